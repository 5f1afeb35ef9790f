use futures::{SinkExt, StreamExt};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use task_queue_client::{ClientError, TaskQueueAsyncClient, TaskQueueClient, TaskQueueControl};
use task_queue_core::{ActiveTask, ActiveTasks, RevokeSignal, TaskSignature, WorkerName};
use task_queue_protocol::{AckResponse, ActiveReport, Message, MessageCodec, NackResponse};
use tokio::net::TcpListener;
use tokio_util::codec::Framed;
use uuid::Uuid;

type Received = Arc<Mutex<Vec<Message>>>;

/// Minimal broker stand-in: answers every request with `reply` and records it
async fn spawn_broker<F>(reply: F) -> (String, Received)
where
    F: Fn(&Message) -> Option<Message> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let reply = Arc::new(reply);

    let log = received.clone();
    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let log = log.clone();
            let reply = reply.clone();
            tokio::spawn(async move {
                let mut framed = Framed::new(stream, MessageCodec);
                while let Some(Ok(message)) = framed.next().await {
                    let response = reply(&message);
                    log.lock().unwrap().push(message);
                    match response {
                        Some(response) => {
                            if framed.send(response).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            });
        }
    });

    (addr, received)
}

fn ack() -> Message {
    Message::Ack(AckResponse { message: None })
}

#[tokio::test]
async fn test_send_task_returns_handle() {
    let (addr, received) = spawn_broker(|_| Some(ack())).await;
    let client = TaskQueueAsyncClient::connect(addr).await.unwrap();

    let signature = TaskSignature::new("echo", b"hello".to_vec(), "alice@box").unwrap();
    let expected_id = signature.id;
    let handle = client.send_task(signature).await.unwrap();

    assert_eq!(handle.id, expected_id);
    assert_eq!(handle.name, "echo");
    assert_eq!(handle.queue, "alice@box");

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    match &received[0] {
        Message::SendTask(req) => assert_eq!(req.signature.id, expected_id),
        other => panic!("Unexpected message: {:?}", other),
    }
}

#[tokio::test]
async fn test_revoke_sends_terminate_and_signal() {
    let (addr, received) = spawn_broker(|_| Some(ack())).await;
    let client = TaskQueueAsyncClient::connect(addr).await.unwrap();
    let task_id = Uuid::new_v4();

    client.revoke(task_id, true, RevokeSignal::Kill).await.unwrap();

    let received = received.lock().unwrap();
    match &received[0] {
        Message::Revoke(req) => {
            assert_eq!(req.request.task_ids, vec![task_id]);
            assert!(req.request.terminate);
            assert_eq!(req.request.signal, RevokeSignal::Kill);
        }
        other => panic!("Unexpected message: {:?}", other),
    }
}

#[tokio::test]
async fn test_inspect_active_through_trait() {
    let worker = WorkerName::new("bob@node-2").unwrap();
    let task_id = Uuid::new_v4();

    let mut active = ActiveTasks::new();
    active.insert(worker.clone(), vec![ActiveTask::new(task_id, "sleep")]);
    let report = active.clone();

    let (addr, received) = spawn_broker(move |message| match message {
        Message::InspectActive(_) => Some(Message::ActiveReport(ActiveReport {
            active: report.clone(),
        })),
        _ => Some(ack()),
    })
    .await;

    let client = TaskQueueAsyncClient::connect(addr)
        .await
        .unwrap()
        .with_inspect_timeout(Duration::from_millis(250));
    let control: &dyn TaskQueueControl = &client;

    let result = control.inspect_active().await.unwrap();
    assert_eq!(result, active);
    assert_eq!(result.get(&worker).unwrap()[0].id, task_id);

    let received = received.lock().unwrap();
    match &received[0] {
        Message::InspectActive(req) => {
            assert!(req.destination.is_none());
            assert_eq!(req.reply_timeout_ms, 250);
        }
        other => panic!("Unexpected message: {:?}", other),
    }
}

#[tokio::test]
async fn test_nack_becomes_server_error() {
    let (addr, _) = spawn_broker(|_| {
        Some(Message::Nack(NackResponse {
            error: "queue is full".to_string(),
        }))
    })
    .await;
    let client = TaskQueueAsyncClient::connect(addr).await.unwrap();

    let result = client.revoke(Uuid::new_v4(), true, RevokeSignal::Term).await;
    match result {
        Err(ClientError::ServerError(msg)) => assert_eq!(msg, "queue is full"),
        other => panic!("Expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_reply_is_protocol_error() {
    let (addr, _) = spawn_broker(|_| Some(ack())).await;
    let client = TaskQueueAsyncClient::connect(addr).await.unwrap();

    let result = client.inspect_active(None).await;
    assert!(matches!(result, Err(ClientError::ProtocolError(_))));
}

#[tokio::test]
async fn test_closed_connection_is_connection_error() {
    let (addr, _) = spawn_broker(|_| None).await;
    let client = TaskQueueAsyncClient::connect(addr).await.unwrap();

    let signature = TaskSignature::new("echo", vec![], "q").unwrap();
    let result = client.send_task(signature).await;
    assert!(matches!(result, Err(ClientError::ConnectionError(_))));
}

#[tokio::test]
async fn test_silent_broker_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let client = TaskQueueAsyncClient::connect_with_timeout(addr, Duration::from_millis(100))
        .await
        .unwrap()
        .with_inspect_timeout(Duration::from_millis(50));

    let result = client.inspect_active(None).await;
    assert!(matches!(result, Err(ClientError::Timeout)));
}

#[test]
fn test_blocking_client() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (addr, received) = runtime.block_on(spawn_broker(|_| Some(ack())));

    let client = TaskQueueClient::connect(addr).unwrap();
    let signature = TaskSignature::new("echo", vec![], "q").unwrap();
    let handle = client.send_task(signature).unwrap();
    client.revoke(handle.id, true, RevokeSignal::Term).unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 2);
    assert!(matches!(received[1], Message::Revoke(_)));
}
