use shotgrid::protocol::{GameApi, Message, PROTOCOL_VERSION};
use shotgrid::transport::{in_memory::InMemoryTransport, Transport};
use shotgrid::{ErrorKind, GameSession, GameStatistic, SessionHandle, ShotResult, Skeleton, Stub};

fn serve(session: SessionHandle) -> (Stub<InMemoryTransport>, tokio::task::JoinHandle<()>) {
    let (server_transport, client_transport) = InMemoryTransport::pair();
    let server = tokio::spawn(async move {
        let mut skeleton = Skeleton::new(session, server_transport);
        skeleton.run().await.unwrap();
    });
    (Stub::new(client_transport), server)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stub_skeleton_full_game() -> anyhow::Result<()> {
    let session = SessionHandle::new(GameSession::new());
    let (stub, server) = serve(session.clone());

    stub.start(10).await?;
    stub.add_ships("1A 1B").await?;
    assert_eq!(
        stub.shoot("1A").await?,
        ShotResult { destroyed: false, knocked: true, game_ended: false }
    );
    assert_eq!(
        stub.shoot("1B").await?,
        ShotResult { destroyed: true, knocked: true, game_ended: true }
    );
    assert_eq!(
        stub.statistic().await?,
        GameStatistic { ship_count: 1, destroyed: 1, knocked: 0, shot_count: 2 }
    );

    // Server and local handle share one session.
    assert_eq!(session.statistic().await?.shot_count, 2);

    stub.end().await?;
    assert_eq!(stub.statistic().await?, GameStatistic::default());

    drop(stub);
    server.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_errors_keep_their_kind_across_the_wire() -> anyhow::Result<()> {
    let (stub, server) = serve(SessionHandle::default());

    let err = stub.start(0).await.unwrap_err();
    assert_eq!(ErrorKind::of(&err), ErrorKind::BadRequest);

    stub.start(10).await?;
    let err = stub.add_ships("1A 2B, 1A 2B").await.unwrap_err();
    assert_eq!(ErrorKind::of(&err), ErrorKind::BadRequest);
    assert_eq!(err.to_string(), "Ship has been added already.");

    stub.add_ships("1A 1B").await?;
    stub.shoot("1A").await?;
    let err = stub.shoot("1A").await.unwrap_err();
    assert_eq!(ErrorKind::of(&err), ErrorKind::Internal);

    stub.shoot("1B").await?;
    let err = stub.shoot("3C").await.unwrap_err();
    assert_eq!(ErrorKind::of(&err), ErrorKind::InvalidState);
    assert_eq!(err.to_string(), "Game is finished.");

    drop(stub);
    server.await?;
    Ok(())
}

#[tokio::test]
async fn test_skeleton_rejects_missing_handshake() {
    let (server_transport, mut client) = InMemoryTransport::pair();
    let server = tokio::spawn(async move {
        let mut skeleton = Skeleton::new(SessionHandle::default(), server_transport);
        skeleton.run().await
    });
    client.send(Message::StatisticReq).await.unwrap();
    let result = server.await.unwrap();
    assert!(result.unwrap_err().to_string().contains("handshake"));
}

#[tokio::test]
async fn test_skeleton_answers_unexpected_messages_with_bad_request() {
    let (server_transport, mut client) = InMemoryTransport::pair();
    let server = tokio::spawn(async move {
        let mut skeleton = Skeleton::new(SessionHandle::default(), server_transport);
        skeleton.run().await
    });
    client.send(Message::Hello { version: PROTOCOL_VERSION }).await.unwrap();
    assert_eq!(client.recv().await.unwrap(), Message::Hello { version: PROTOCOL_VERSION });

    client.send(Message::Ack).await.unwrap();
    match client.recv().await.unwrap() {
        Message::Error { kind, .. } => assert_eq!(kind, ErrorKind::BadRequest),
        other => panic!("unexpected reply {:?}", other),
    }

    drop(client);
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_in_memory_closed_channel_detection() {
    let (mut t1, mut t2) = InMemoryTransport::pair();
    t1.send(Message::Ack).await.unwrap();
    drop(t1);

    assert_eq!(t2.recv().await.unwrap(), Message::Ack);
    let result = t2.recv().await;
    assert!(result.unwrap_err().to_string().contains("closed"));
}

#[tokio::test]
async fn test_in_memory_shutdown() {
    let (mut t1, _t2) = InMemoryTransport::pair();
    t1.shutdown();
    let result = t1.send(Message::Ack).await;
    assert!(result.unwrap_err().to_string().contains("shut down"));
}
