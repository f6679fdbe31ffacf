//! Scenario tests for route assembly.

use super::*;
use std::time::Duration;

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::distance::{MockDistanceProvider, OsrmClient, OsrmConfig};
use crate::domain::{Coordinate, Line, LineId, Segment, Stop, StopId};
use crate::store::NetworkData;

/// Test network:
///
/// ```text
/// Line 10: P1 - P2 - P3
/// Line 20:           P3 - P4
/// Line 30: P5 - P6
/// Line 40: P1 - P2
/// Line 50: (no stops)
/// P7 is not served by any line.
/// ```
fn network() -> NetworkData {
    let stops = (1..=7)
        .map(|i| {
            Stop::new(StopId(i), format!("P{i}"), format!("P{i}-mm"))
                .with_coordinate(Coordinate::new(16.80 + i as f64 * 0.01, 96.15).unwrap())
        })
        .collect();

    let lines = vec![
        Line::new(LineId(1), 10, "P1 to P3"),
        Line::new(LineId(2), 20, "P3 to P4"),
        Line::new(LineId(3), 30, "P5 to P6"),
        Line::new(LineId(4), 40, "P1 to P2"),
        Line::new(LineId(5), 50, "Not yet running"),
    ];

    let route = |line: u32, stops: &[u32]| -> Vec<Segment> {
        stops
            .iter()
            .enumerate()
            .map(|(i, s)| Segment::new(LineId(line), StopId(*s), (i as i32 + 1) * 10))
            .collect()
    };
    let segments = [
        route(1, &[1, 2, 3]),
        route(2, &[3, 4]),
        route(3, &[5, 6]),
        route(4, &[1, 2]),
    ]
    .concat();

    NetworkData::new(stops, lines, segments).unwrap()
}

fn stop_ids(stops: &[LineStop]) -> Vec<u32> {
    stops.iter().map(|s| s.stop.id.0).collect()
}

#[tokio::test]
async fn direct_lines_skip_path_search() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    let outcome = planner.plan(StopId(1), StopId(2)).await.unwrap();

    let RouteOutcome::Direct { from, to, lines } = &outcome else {
        panic!("expected direct outcome, got {outcome:?}");
    };
    assert_eq!(from.id, StopId(1));
    assert_eq!(to.id, StopId(2));
    assert_eq!(
        lines.iter().map(|l| l.number).collect::<Vec<_>>(),
        vec![10, 40]
    );
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn same_stop_has_no_legs() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    let outcome = planner.plan(StopId(3), StopId(3)).await.unwrap();

    let RouteOutcome::Transfer(itinerary) = &outcome else {
        panic!("expected transfer outcome, got {outcome:?}");
    };
    assert!(itinerary.legs.is_empty());
    assert_eq!(itinerary.transfers, 0);
    assert!(!itinerary.total.is_available());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn one_transfer_route() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    let outcome = planner.plan(StopId(1), StopId(4)).await.unwrap();

    let RouteOutcome::Transfer(itinerary) = &outcome else {
        panic!("expected transfer outcome, got {outcome:?}");
    };
    assert_eq!(itinerary.transfers, 1);
    assert_eq!(itinerary.legs.len(), 2);

    let first = &itinerary.legs[0];
    assert_eq!(first.line.number, 10);
    assert_eq!(stop_ids(&first.stops), vec![1, 2, 3]);

    let second = &itinerary.legs[1];
    assert_eq!(second.line.number, 20);
    assert_eq!(stop_ids(&second.stops), vec![3, 4]);

    // One lookup per leg
    assert_eq!(mock.call_count(), 2);

    let leg_km: f64 = itinerary
        .legs
        .iter()
        .filter_map(|l| l.annotation.distance_km)
        .sum();
    let total_km = itinerary.total.distance_km.unwrap();
    assert!((total_km - leg_km).abs() < 0.011, "{total_km} vs {leg_km}");
}

#[tokio::test]
async fn reverse_direction_route() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    let outcome = planner.plan(StopId(4), StopId(1)).await.unwrap();

    let RouteOutcome::Transfer(itinerary) = &outcome else {
        panic!("expected transfer outcome, got {outcome:?}");
    };
    assert_eq!(itinerary.transfers, 1);
    assert_eq!(stop_ids(&itinerary.legs[0].stops), vec![4, 3]);
    assert_eq!(stop_ids(&itinerary.legs[1].stops), vec![3, 2, 1]);
}

#[tokio::test]
async fn disconnected_stops_have_no_route() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    for (from, to) in [(1, 5), (6, 4), (1, 7), (7, 2)] {
        let outcome = planner.plan(StopId(from), StopId(to)).await.unwrap();
        assert!(
            matches!(outcome, RouteOutcome::NoRoute { .. }),
            "{from} -> {to}: {outcome:?}"
        );
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn unknown_stop_is_an_error() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    let err = planner.plan(StopId(1), StopId(99)).await.unwrap_err();
    assert_eq!(err, PlanError::StopNotFound("99".to_string()));
}

#[tokio::test]
async fn planning_is_idempotent() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    let first = planner.plan(StopId(2), StopId(4)).await.unwrap();
    let second = planner.plan(StopId(2), StopId(4)).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn provider_failure_still_returns_route() {
    let data = network();
    let mock = MockDistanceProvider::failing();
    let planner = RoutePlanner::new(&data, &mock);

    let outcome = planner.plan(StopId(1), StopId(4)).await.unwrap();

    let RouteOutcome::Transfer(itinerary) = &outcome else {
        panic!("expected transfer outcome, got {outcome:?}");
    };
    assert_eq!(itinerary.legs.len(), 2);
    assert!(itinerary.legs.iter().all(|l| !l.annotation.is_available()));
    assert_eq!(itinerary.total, RouteAnnotation::unavailable());
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn slow_routing_service_still_returns_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"code": "Ok", "routes": [{"distance": 1000.0, "duration": 60.0}]}"#)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let client = OsrmClient::new(
        OsrmConfig::new()
            .with_base_url(server.uri())
            .with_timeout(1),
    )
    .unwrap();

    let data = network();
    let planner = RoutePlanner::new(&data, &client);
    let outcome = planner.plan(StopId(1), StopId(4)).await.unwrap();

    let RouteOutcome::Transfer(itinerary) = &outcome else {
        panic!("expected transfer outcome, got {outcome:?}");
    };
    assert_eq!(itinerary.transfers, 1);
    assert_eq!(stop_ids(&itinerary.legs[0].stops), vec![1, 2, 3]);
    assert_eq!(stop_ids(&itinerary.legs[1].stops), vec![3, 4]);
    assert!(itinerary.legs.iter().all(|l| !l.annotation.is_available()));
    assert_eq!(itinerary.total, RouteAnnotation::unavailable());
}

#[tokio::test]
async fn plan_by_name_resolves_both_ends() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    let outcome = planner
        .plan_by_name(&StopQuery::parse("p1"), &StopQuery::parse("P4-mm"))
        .await
        .unwrap();
    assert!(matches!(outcome, RouteOutcome::Transfer(_)));

    let err = planner
        .plan_by_name(&StopQuery::parse("P1"), &StopQuery::parse("Nowhere (Strand)"))
        .await
        .unwrap_err();
    assert_eq!(err, PlanError::StopNotFound("Nowhere (Strand)".to_string()));
}

#[test]
fn stops_between_follows_direction() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    let slices = planner.stops_between(StopId(2), StopId(1));
    assert_eq!(
        slices.iter().map(|s| s.line.number).collect::<Vec<_>>(),
        vec![10, 40]
    );
    assert!(slices.iter().all(|s| stop_ids(&s.stops) == vec![2, 1]));

    let slices = planner.stops_between(StopId(3), StopId(1));
    assert_eq!(slices.len(), 1);
    assert_eq!(stop_ids(&slices[0].stops), vec![3, 2, 1]);

    assert!(planner.stops_between(StopId(1), StopId(4)).is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn full_line_details() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    let details = planner.line_details(10, None).await.unwrap();
    assert_eq!(details.from.id, StopId(1));
    assert_eq!(details.to.id, StopId(3));
    assert_eq!(details.stop_count(), 3);
    assert!(details.annotation.is_available());
}

#[tokio::test]
async fn line_details_between_stops() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    let details = planner
        .line_details(10, Some((StopId(3), StopId(2))))
        .await
        .unwrap();
    assert_eq!(stop_ids(&details.stops), vec![3, 2]);
}

#[tokio::test]
async fn line_details_errors() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    assert_eq!(
        planner.line_details(99, None).await.unwrap_err(),
        PlanError::LineNotFound(99)
    );
    assert_eq!(
        planner.line_details(50, None).await.unwrap_err(),
        PlanError::EmptyLine(50)
    );
    assert_eq!(
        planner
            .line_details(10, Some((StopId(1), StopId(4))))
            .await
            .unwrap_err(),
        PlanError::StopNotOnLine {
            line: 10,
            stop: StopId(4)
        }
    );
    assert_eq!(
        planner
            .line_details(10, Some((StopId(1), StopId(42))))
            .await
            .unwrap_err(),
        PlanError::StopNotFound("42".to_string())
    );
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn lines_at_stop_are_ordered_and_annotated() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    let lines = planner.lines_at_stop(StopId(3)).await.unwrap();
    assert_eq!(
        lines
            .iter()
            .map(|l| (l.line.number, l.stop_count, l.first.id.0, l.last.id.0))
            .collect::<Vec<_>>(),
        vec![(10, 3, 1, 3), (20, 2, 3, 4)]
    );
    assert!(lines.iter().all(|l| l.annotation.is_available()));
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn lines_at_unserved_stop() {
    let data = network();
    let mock = MockDistanceProvider::new();
    let planner = RoutePlanner::new(&data, &mock);

    assert!(planner.lines_at_stop(StopId(7)).await.unwrap().is_empty());
    assert_eq!(
        planner.lines_at_stop(StopId(70)).await.unwrap_err(),
        PlanError::StopNotFound("70".to_string())
    );
}
