// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reference points of rooms and doors

use roomcheck_model::{ElementId, GeometryQuery, Point};

/// Point used to find a room's owning sector: its bounding-box centre
pub fn room_sector_point(geometry: &dyn GeometryQuery, room: ElementId) -> Option<Point> {
    geometry.bounding_box_center(room)
}

/// Point used to order rooms within a group
///
/// The room's location point, or its bounding-box centre when it has no
/// location.
pub fn room_order_point(geometry: &dyn GeometryQuery, room: ElementId) -> Option<Point> {
    match geometry.location(room) {
        Some(location) => Some(location.reference_point()),
        None => geometry.bounding_box_center(room),
    }
}

/// Point used to find a door's owning sector
///
/// Location point, then the midpoint of a location curve, then the
/// bounding-box centre.
pub fn door_reference_point(geometry: &dyn GeometryQuery, door: ElementId) -> Option<Point> {
    geometry
        .location(door)
        .map(|location| location.reference_point())
        .or_else(|| geometry.bounding_box_center(door))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomcheck_model::{BoundingBox, Location};

    struct Fixture;

    impl GeometryQuery for Fixture {
        fn bounding_box(&self, id: ElementId) -> Option<BoundingBox> {
            match id.0 {
                1 | 2 => Some(BoundingBox::new(
                    Point::new(0.0, 0.0, 10.0),
                    Point::new(4.0, 6.0, 20.0),
                )),
                _ => None,
            }
        }

        fn location(&self, id: ElementId) -> Option<Location> {
            match id.0 {
                1 => Some(Location::Point(Point::new(1.0, 1.0, 10.0))),
                3 => Some(Location::Curve {
                    start: Point::xy(0.0, 0.0),
                    end: Point::xy(2.0, 0.0),
                }),
                _ => None,
            }
        }
    }

    #[test]
    fn test_room_points() {
        let geo = Fixture;
        assert_eq!(room_sector_point(&geo, ElementId(1)), Some(Point::xy(2.0, 3.0)));
        assert_eq!(
            room_order_point(&geo, ElementId(1)),
            Some(Point::new(1.0, 1.0, 10.0))
        );
        assert_eq!(room_order_point(&geo, ElementId(2)), Some(Point::xy(2.0, 3.0)));
        assert_eq!(room_order_point(&geo, ElementId(9)), None);
        assert_eq!(room_sector_point(&geo, ElementId(3)), None);
    }

    #[test]
    fn test_door_point_fallbacks() {
        let geo = Fixture;
        assert_eq!(
            door_reference_point(&geo, ElementId(1)),
            Some(Point::new(1.0, 1.0, 10.0))
        );
        assert_eq!(door_reference_point(&geo, ElementId(3)), Some(Point::xy(1.0, 0.0)));
        assert_eq!(door_reference_point(&geo, ElementId(2)), Some(Point::xy(2.0, 3.0)));
        assert_eq!(door_reference_point(&geo, ElementId(4)), None);
    }
}
