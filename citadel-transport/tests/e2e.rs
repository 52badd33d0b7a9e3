use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::net::TcpStream;

use citadel_session::{Participant, ParticipantState, Role};
use citadel_transport::config::ReactorConfig;
use citadel_transport::frame::{encode_data_record, encode_finished, parse_data_record, HandshakeMessageType};
use citadel_transport::handshake::ClientHandshake;
use citadel_transport::reactor::Reactor;

async fn read_handshake_frame(stream: &mut TcpStream) -> Vec<u8> {
    let mut msg_type = [0u8; 1];
    stream.read_exact(&mut msg_type).await.unwrap();
    if msg_type[0] == HandshakeMessageType::Finished as u8 {
        return vec![msg_type[0]];
    }
    let mut len_buf = [0u8; 4];
    stream.read_exact(&mut len_buf).await.unwrap();
    let len = i32::from_be_bytes(len_buf) as usize;
    let mut payload = vec![0u8; len];
    stream.read_exact(&mut payload).await.unwrap();
    let mut frame = Vec::with_capacity(5 + len);
    frame.push(msg_type[0]);
    frame.extend_from_slice(&len_buf);
    frame.extend_from_slice(&payload);
    frame
}

#[tokio::test]
async fn client_completes_handshake_and_exchanges_a_data_record_with_the_reactor() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ReactorConfig::default();
    config.handshake_timeout = Duration::from_secs(5);
    let reactor = Reactor::new(config);
    let reactor_for_serve = reactor.clone();
    tokio::spawn(async move {
        let _ = reactor_for_serve.serve(listener).await;
    });

    let mut stream = TcpStream::connect(addr).await.unwrap();

    let (client, client_hello) = ClientHandshake::start().unwrap();
    stream.write_all(&client_hello).await.unwrap();

    let server_hello = read_handshake_frame(&mut stream).await;
    let client_participant = Participant::new(Role::Initiator);
    let finished = client.complete(&server_hello, &client_participant, [0u8; 12]).unwrap();
    assert_eq!(finished, encode_finished().to_vec());
    stream.write_all(&finished).await.unwrap();

    assert_eq!(client_participant.state(), ParticipantState::Established);

    // Give the reactor a moment to register the participant before we tear
    // the connection down; real clients would proceed straight to data
    // records here.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let security = client_participant.security();
    let ctx = security.as_ref().unwrap();
    let nonce = ctx.next_write_nonce().unwrap();
    let record = encode_data_record(&nonce, b"hello reactor");
    let (sent_nonce, sent_ct) = parse_data_record(&record).unwrap();
    assert_eq!(sent_nonce, nonce.as_slice());
    assert_eq!(sent_ct, b"hello reactor");

    stream.write_u32(record.len() as u32).await.unwrap();
    stream.write_all(&record).await.unwrap();
}

#[tokio::test]
async fn client_hello_split_across_arbitrary_tcp_fragments_still_establishes() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ReactorConfig::default();
    config.handshake_timeout = Duration::from_secs(5);
    let reactor = Reactor::new(config);
    let reactor_for_serve = reactor.clone();
    tokio::spawn(async move {
        let _ = reactor_for_serve.serve(listener).await;
    });

    let mut stream = TcpStream::connect(addr).await.unwrap();

    let (client, client_hello) = ClientHandshake::start().unwrap();
    // Dribble the CLIENT_HELLO frame out one byte at a time instead of in a
    // single write, so the reactor's handshake read sees it split across
    // many arbitrary TCP segments.
    for byte in &client_hello {
        stream.write_all(std::slice::from_ref(byte)).await.unwrap();
        tokio::task::yield_now().await;
    }

    let server_hello = read_handshake_frame(&mut stream).await;
    let client_participant = Participant::new(Role::Initiator);
    let finished = client.complete(&server_hello, &client_participant, [0u8; 12]).unwrap();

    for byte in &finished {
        stream.write_all(std::slice::from_ref(byte)).await.unwrap();
        tokio::task::yield_now().await;
    }

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(client_participant.state(), ParticipantState::Established);
}

#[tokio::test]
async fn reactor_closes_connection_that_never_completes_the_handshake() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ReactorConfig::default();
    config.handshake_timeout = Duration::from_millis(100);
    let reactor = Reactor::new(config);
    tokio::spawn(async move {
        let _ = reactor.serve(listener).await;
    });

    let mut stream = TcpStream::connect(addr).await.unwrap();
    // Send nothing; the reactor's per-connection handshake timeout should
    // close the socket from its side within the configured budget.
    tokio::time::sleep(Duration::from_millis(300)).await;

    let mut buf = [0u8; 1];
    let result = stream.read(&mut buf).await;
    assert!(matches!(result, Ok(0)) || result.is_err());
}
