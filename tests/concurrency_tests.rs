use std::sync::Arc;

use shotgrid::{ErrorKind, GameApi, GameError, GameSession, GameStatistic, SessionHandle};

async fn ready(spec: &str) -> SessionHandle {
    let session = SessionHandle::new(GameSession::new());
    session.start(10).await.unwrap();
    session.add_ships(spec).await.unwrap();
    session
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_shots_all_land() {
    let cases = [
        ("1A 2B", "1A, 2B", (1, 0, 1)),
        ("1A 2B", "1A, 2A, 2B, 1B", (1, 1, 0)),
        ("4E 5F, 2A 2B, 9A 10A, 9I 10K, 3H 3I", "7C", (5, 0, 0)),
    ];
    for (ships, shots, (ship_count, destroyed, knocked)) in cases {
        let session = ready(ships).await;
        let cells: Vec<String> = shots.split(',').map(|c| c.trim().to_owned()).collect();
        let tasks: Vec<_> = cells
            .iter()
            .cloned()
            .map(|cell| {
                let session = session.clone();
                tokio::spawn(async move { session.shoot(&cell).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(
            session.statistic().await.unwrap(),
            GameStatistic {
                ship_count,
                destroyed,
                knocked,
                shot_count: cells.len(),
            }
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_shots_on_disjoint_ships() {
    let session = ready("1A 1B, 3C 3D, 5E 5F, 7G 7H").await;
    let tasks: Vec<_> = ["1A, 1B", "3C, 3D", "5E, 5F", "7G"]
        .into_iter()
        .map(|spec| {
            let session = session.clone();
            tokio::spawn(async move { session.shoot(spec).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }
    let stats = session.statistic().await.unwrap();
    assert_eq!(stats.ship_count, 4);
    assert_eq!(stats.destroyed, 3);
    assert_eq!(stats.knocked, 1);
    assert_eq!(stats.shot_count, 4);
}

#[test]
fn test_racing_shots_on_one_cell_hit_once() {
    for _ in 0..50 {
        let session = Arc::new(GameSession::new());
        session.start(10).unwrap();
        session.add_ships("1A 1B, 5E 5F").unwrap();

        let threads: Vec<_> = (0..2)
            .map(|_| {
                let session = Arc::clone(&session);
                std::thread::spawn(move || session.shoot("1A"))
            })
            .collect();
        let results: Vec<Result<_, GameError>> =
            threads.into_iter().map(|t| t.join().unwrap()).collect();

        let ok = results.iter().filter(|r| r.is_ok()).count();
        let fatal = results
            .iter()
            .filter(|r| matches!(r, Err(e) if e.kind() == ErrorKind::Internal))
            .count();
        assert_eq!((ok, fatal), (1, 1));
        let stats = session.statistic();
        assert_eq!(stats.knocked, 1);
        assert_eq!(stats.shot_count, 2);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shot_count_matches_calls_under_load() {
    let session = ready("1A 1B").await;
    let tasks: Vec<_> = (0..64)
        .map(|i| {
            let session = session.clone();
            // Every call fails validation but still counts.
            let spec = if i % 2 == 0 { "" } else { "11A" };
            tokio::spawn(async move { session.shoot(spec).await })
        })
        .collect();
    for task in tasks {
        let err = task.await.unwrap().unwrap_err();
        assert_eq!(ErrorKind::of(&err), ErrorKind::BadRequest);
    }
    assert_eq!(session.statistic().await.unwrap().shot_count, 64);
}
