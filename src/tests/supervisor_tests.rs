use std::path::Path;
use std::time::Duration;

use super::stub::{StubDriver, World};
use crate::driver::{Driver, Session};
use crate::session::SessionSupervisor;

fn supervisor(world: &World) -> SessionSupervisor<StubDriver> {
    SessionSupervisor::new(world.driver(), "stub-profile").with_pause(Duration::ZERO)
}

#[tokio::test]
async fn session_self_heals_after_validity_failure() {
    let world = World::new();
    let mut sup = supervisor(&world);

    sup.acquire_session().await.expect("initial launch");
    assert_eq!(world.launches(), 1);

    world.kill_sessions();

    // The dead handle must be replaced transparently, without erroring
    sup.acquire_session().await.expect("recreated session");
    assert_eq!(world.launches(), 2);
    assert_eq!(sup.launch_count(), 2);
}

#[tokio::test]
async fn acquire_is_a_noop_while_session_is_valid() {
    let world = World::new();
    let mut sup = supervisor(&world);

    sup.acquire_session().await.unwrap();
    sup.acquire_session().await.unwrap();
    sup.acquire_session().await.unwrap();

    assert_eq!(world.launches(), 1);
}

#[tokio::test]
async fn close_is_idempotent() {
    let world = World::new();
    let driver = world.driver();
    let session = driver.launch(Path::new("stub-profile")).await.unwrap();

    session.close().await;
    session.close().await;

    assert_eq!(world.closes(), 2);
}

#[tokio::test]
async fn force_recreate_without_session_just_launches() {
    let world = World::new();
    let mut sup = supervisor(&world);

    sup.force_recreate().await.expect("launch");
    assert_eq!(world.launches(), 1);
    assert_eq!(world.closes(), 0);
}

#[tokio::test]
async fn page_acquirer_reuses_the_single_tab() {
    let world = World::new();
    let mut sup = supervisor(&world);

    let _first = sup.acquire_page().await.unwrap();
    let _second = sup.acquire_page().await.unwrap();

    assert_eq!(world.launches(), 1);
    assert_eq!(world.open_pages(), 1);
}

#[tokio::test]
async fn page_acquisition_survives_a_failed_launch() {
    let world = World::new();
    world.fail_next_launches(1);
    let mut sup = supervisor(&world);

    sup.acquire_page().await.expect("page after relaunch");
    assert_eq!(world.launches(), 1);
}

#[tokio::test]
async fn page_acquisition_gives_up_after_budget() {
    let world = World::new();
    world.fail_next_launches(10);
    let mut sup = supervisor(&world);

    // Must error out rather than hang
    assert!(sup.acquire_page().await.is_err());
}

#[tokio::test]
async fn shutdown_closes_the_session() {
    let world = World::new();
    let mut sup = supervisor(&world);

    sup.acquire_page().await.unwrap();
    sup.shutdown().await;
    assert_eq!(world.closes(), 1);

    // A second shutdown has nothing to close and must not panic
    sup.shutdown().await;
    assert_eq!(world.closes(), 1);
}
