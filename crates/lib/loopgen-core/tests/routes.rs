use loopgen_core::cardinal::Cardinal;
use loopgen_core::routes::{RouteTable, REROUTE_HORIZON};

#[test]
fn test_route_rotations() {
    let table = RouteTable::build();
    let edges: Vec<String> = table.routes().iter().map(|r| r.edges_string()).collect();
    assert_eq!(
        edges,
        vec![
            "top left bottom right",
            "left bottom right top",
            "bottom right top left",
            "right top left bottom",
        ]
    );
    let ids: Vec<String> = table.routes().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["routetop", "routeleft", "routebottom", "routeright"]);
}

#[test]
fn test_routes_are_rotations_of_one_loop() {
    let table = RouteTable::build();
    let reference = table.route(Cardinal::Bottom).unwrap().edges;
    for route in table.routes() {
        assert_eq!(route.edges[0], route.start);
        let shift = reference.iter().position(|&edge| edge == route.start).unwrap();
        let mut rotated = reference;
        rotated.rotate_left(shift);
        assert_eq!(route.edges, rotated);

        let mut sorted: Vec<usize> = route.edges.iter().map(|e| e.ring_index()).collect();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }
}

#[test]
fn test_rerouters_target_top_and_bottom() {
    let table = RouteTable::build();
    let rerouters = table.rerouters();
    assert_eq!(rerouters.len(), 2);

    assert_eq!(rerouters[0].id, "rerouterBottom");
    assert_eq!(rerouters[0].edge, Cardinal::Bottom);
    assert_eq!(rerouters[0].target_route(), "routebottom");

    assert_eq!(rerouters[1].id, "rerouterTop");
    assert_eq!(rerouters[1].edge, Cardinal::Top);
    assert_eq!(rerouters[1].target_route(), "routetop");

    for rerouter in rerouters {
        assert!(matches!(rerouter.target, Cardinal::Top | Cardinal::Bottom));
        assert_eq!((rerouter.begin, rerouter.end), (0, REROUTE_HORIZON));
        assert_eq!(rerouter.end, 100_000);
        assert!(table.route(rerouter.target).is_some());
    }
}
