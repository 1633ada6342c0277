//! # Detectors
//!
//! One [`TaskDetector`] per required lab task. Each inspects the loaded
//! sources independently and scores completeness, correctness and quality.
//!
//! | Task | Detector | Max |
//! |---|---|---|
//! | 1 | [`connection::ConnectionDetector`] | 14 |
//! | 2 | [`schema::SchemaDetector`] | 14 |
//! | 3 | [`create_route::CreateRouteDetector`] | 14 |
//! | 4 | [`read_routes::ReadRoutesDetector`] | 14 |
//! | 5 | [`update_route::UpdateRouteDetector`] | 14 |
//! | 6 | [`delete_route::DeleteRouteDetector`] | 10 |

pub mod connection;
pub mod create_route;
pub mod delete_route;
pub mod read_routes;
pub mod schema;
pub mod update_route;

use crate::traits::detector::TaskDetector;

/// The six lab detectors, in task order.
pub fn lab_detectors() -> Vec<Box<dyn TaskDetector>> {
    vec![
        Box::new(connection::ConnectionDetector),
        Box::new(schema::SchemaDetector),
        Box::new(create_route::CreateRouteDetector),
        Box::new(read_routes::ReadRoutesDetector),
        Box::new(update_route::UpdateRouteDetector),
        Box::new(delete_route::DeleteRouteDetector),
    ]
}
