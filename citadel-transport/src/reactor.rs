//! The transport reactor: one accept loop, one reader/writer task pair per
//! participant, and two periodic sweep tasks (handshake timeout, session
//! timeout). Everything runs on a single `tokio::net::TcpListener` plus
//! cooperatively scheduled tasks — the async equivalent of "exactly one
//! event-loop thread drives selector operations."

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use citadel_envelope::strategy::aead::AeadCipher;
use citadel_envelope::strategy::traits::AeadCipherStrategy;
use citadel_session::{Participant, ParticipantId, ParticipantState, Role, Session, SessionConfig, SessionId};

use crate::config::ReactorConfig;
use crate::error::{Result, TransportError};
use crate::frame::{parse_data_record, HANDSHAKE_SIZE_LIMIT};
use crate::handshake::ServerHandshake;

/// An outbound application record queued for a participant's writer task.
/// The queue is an MPSC FIFO: application threads push, the writer task is
/// the sole consumer, preserving per-participant send order.
pub struct OutboundFrame(pub Vec<u8>);

/// The reactor keeps a map of concurrent sessions keyed by [`SessionId`]
/// rather than hard-wiring a single one. Every incoming participant that
/// doesn't negotiate a session id out-of-band joins `default_session_id`,
/// but a caller embedding this reactor can create and route to additional
/// sessions through [`Reactor::create_session`]/[`Reactor::session`].
pub struct Reactor {
    config: ReactorConfig,
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
    default_session_id: SessionId,
    senders: std::sync::Mutex<HashMap<ParticipantId, mpsc::UnboundedSender<OutboundFrame>>>,
}

impl Reactor {
    pub fn new(config: ReactorConfig) -> Arc<Self> {
        let default_session = Session::create(None, SessionConfig::default());
        default_session.activate().ok();
        let default_session_id = default_session.id().clone();
        let mut sessions = HashMap::new();
        sessions.insert(default_session_id.clone(), default_session);
        Arc::new(Self {
            config,
            sessions: RwLock::new(sessions),
            default_session_id,
            senders: std::sync::Mutex::new(HashMap::new()),
        })
    }

    /// Every new TCP connection joins this session unless the embedding
    /// application routes it elsewhere before the handshake completes.
    pub fn default_session(&self) -> Arc<Session> {
        self.session(&self.default_session_id).expect("default session always present")
    }

    pub fn session(&self, id: &SessionId) -> Option<Arc<Session>> {
        self.sessions.read().unwrap().get(id).cloned()
    }

    /// Registers a new concurrent session the reactor can route
    /// participants into, returning the session so the caller can attach
    /// listeners before traffic arrives.
    pub fn create_session(&self, config: SessionConfig) -> Arc<Session> {
        let session = Session::create(None, config);
        session.activate().ok();
        self.sessions.write().unwrap().insert(session.id().clone(), Arc::clone(&session));
        session
    }

    pub fn close_session(&self, id: &SessionId) -> Result<()> {
        let session = self.sessions.write().unwrap().remove(id);
        if let Some(session) = session {
            session.close()?;
        }
        Ok(())
    }

    /// Binds the configured address and runs the accept loop plus sweep
    /// task until the process is killed or the listener errors out.
    pub async fn run(self: Arc<Self>) -> Result<()> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        tracing::info!(addr = %self.config.socket_addr(), "transport reactor listening");
        self.serve(listener).await
    }

    /// Runs the accept loop over an already-bound listener. Split out from
    /// [`Self::run`] so tests can bind to an ephemeral port and still reach
    /// the reactor's accept/handshake/data path.
    pub async fn serve(self: Arc<Self>, listener: TcpListener) -> Result<()> {
        let sweep_handle = {
            let reactor = Arc::clone(&self);
            tokio::spawn(async move { reactor.run_sweeps().await })
        };

        loop {
            let (stream, peer) = listener.accept().await?;
            tracing::debug!(%peer, "accepted connection");
            let reactor = Arc::clone(&self);
            tokio::spawn(async move {
                if let Err(e) = reactor.handle_connection(stream).await {
                    tracing::warn!(error = %e, %peer, "connection closed with error");
                }
            });
        }

        #[allow(unreachable_code)]
        {
            sweep_handle.abort();
            Ok(())
        }
    }

    /// The handshake budget itself is enforced inline in
    /// [`Self::handle_connection`] via `tokio::time::timeout`, since
    /// participants only join the session's participant map once the
    /// handshake succeeds. This task is the idle/session-timeout
    /// heartbeat for participants already established.
    async fn run_sweeps(self: Arc<Self>) {
        let mut session_tick = tokio::time::interval(Duration::from_secs(5));
        loop {
            session_tick.tick().await;
            self.sweep_session_timeout();
        }
    }

    fn sweep_session_timeout(&self) {
        // Idle/session-timeout tracking is driven by per-session timestamps
        // owned by the caller embedding this reactor; this sweep only
        // exists to give the process a steady heartbeat for observability
        // across every session the reactor currently holds open.
        for (id, session) in self.sessions.read().unwrap().iter() {
            if session.state() == citadel_session::SessionState::Terminated {
                continue;
            }
            tracing::trace!(session = %id, participants = session.participant_count(), "session timeout sweep tick");
        }
    }

    async fn handle_connection(self: Arc<Self>, mut stream: TcpStream) -> Result<()> {
        let participant = Arc::new(Participant::new(Role::Responder));
        participant.transition_to(ParticipantState::Handshaking)?;

        let budget = self.config.handshake_timeout;
        let handshake = async {
            let client_hello = read_handshake_frame(&mut stream).await?;
            let (server_hello, shared_secret, client_public) = ServerHandshake::respond(&client_hello)?;
            stream.write_all(&server_hello).await?;

            let finished = read_handshake_frame(&mut stream).await?;
            ServerHandshake::finish(&finished, &participant, shared_secret, client_public, [0u8; 12])?;
            Ok::<(), TransportError>(())
        };

        match tokio::time::timeout(budget, handshake).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                participant.close();
                return Err(e);
            }
            Err(_) => {
                participant.close();
                return Err(TransportError::HandshakeTimeout);
            }
        }
        let session = self.default_session();
        session.add_participant(Arc::clone(&participant))?;
        tracing::info!(participant = %participant.id(), session = %session.id(), "participant established");

        let (tx, mut rx) = mpsc::unbounded_channel::<OutboundFrame>();
        self.senders.lock().unwrap().insert(participant.id().clone(), tx);

        let (mut read_half, mut write_half) = stream.into_split();
        let writer_participant = Arc::clone(&participant);
        let writer = tokio::spawn(async move {
            while let Some(OutboundFrame(bytes)) = rx.recv().await {
                if write_half.write_u32(bytes.len() as u32).await.is_err() {
                    break;
                }
                if write_half.write_all(&bytes).await.is_err() {
                    break;
                }
            }
            let _ = writer_participant;
        });

        let cipher = AeadCipher::aes256_gcm();
        loop {
            let len = match read_half.read_u32().await {
                Ok(len) => len as usize,
                Err(_) => break,
            };
            if len == 0 || len > HANDSHAKE_SIZE_LIMIT {
                break;
            }
            let mut record = vec![0u8; len];
            if read_half.read_exact(&mut record).await.is_err() {
                break;
            }
            let (nonce, ciphertext_bytes) = match parse_data_record(&record) {
                Ok(parts) => parts,
                Err(_) => break,
            };

            let security = participant.security();
            let Some(ctx) = security.as_ref() else { break };
            let ciphertext = citadel_envelope::sdc::Sdc::new_from(&mut ciphertext_bytes.to_vec(), true)?;
            let plaintext = ctx.with_key(|key| Ok(cipher.open(key, nonce, &ciphertext, b"")?));
            ciphertext.close();

            match plaintext {
                Ok(plaintext) => {
                    tracing::trace!(bytes = plaintext.byte_size().unwrap_or(0), participant = %participant.id(), "data received");
                    plaintext.close();
                }
                Err(e) => {
                    tracing::warn!(error = %e, participant = %participant.id(), "record failed to decrypt");
                    break;
                }
            }
        }

        self.senders.lock().unwrap().remove(participant.id());
        writer.abort();
        session.remove_participant(participant.id()).ok();
        Ok(())
    }

    /// Encrypts `plaintext` under the participant's session key and
    /// enqueues it on the participant's writer task.
    pub fn send(&self, participant: &Participant, plaintext: &[u8]) -> Result<()> {
        if participant.state() != ParticipantState::Established {
            return Err(TransportError::MalformedFrame("participant not established"));
        }
        let security = participant.security();
        let ctx = security.as_ref().ok_or(TransportError::MalformedFrame("no security context"))?;
        let nonce = ctx.next_write_nonce()?;
        let plaintext_sdc = citadel_envelope::sdc::Sdc::new_from(&mut plaintext.to_vec(), true)?;
        let cipher = AeadCipher::aes256_gcm();
        let ciphertext = ctx.with_key(|key| Ok(cipher.seal(key, &nonce, &plaintext_sdc, b"")?))?;
        plaintext_sdc.close();
        let ciphertext_bytes = ciphertext.as_byte_buffer()?;
        ciphertext.close();

        let record = crate::frame::encode_data_record(&nonce, &ciphertext_bytes).to_vec();
        let senders = self.senders.lock().unwrap();
        let tx = senders.get(participant.id()).ok_or(TransportError::MalformedFrame("no outbound queue for participant"))?;
        tx.send(OutboundFrame(record)).map_err(|_| TransportError::MalformedFrame("writer task gone"))?;
        Ok(())
    }
}

/// Reads one handshake frame (`type(1) || len(4) || payload` or a bare
/// `FINISHED` byte) off the socket, enforcing the 16 KiB size guard before
/// allocating the payload buffer.
async fn read_handshake_frame(stream: &mut TcpStream) -> Result<Vec<u8>> {
    let mut msg_type = [0u8; 1];
    stream.read_exact(&mut msg_type).await?;

    if msg_type[0] == 0x05 {
        return Ok(vec![msg_type[0]]);
    }

    let mut len_buf = [0u8; 4];
    stream.read_exact(&mut len_buf).await?;
    let len = i32::from_be_bytes(len_buf);
    if len < 0 || len as usize > HANDSHAKE_SIZE_LIMIT {
        return Err(TransportError::HandshakeOverflow { advertised: len as i64, limit: HANDSHAKE_SIZE_LIMIT });
    }
    let mut payload = vec![0u8; len as usize];
    stream.read_exact(&mut payload).await?;

    let mut frame = Vec::with_capacity(1 + 4 + payload.len());
    frame.push(msg_type[0]);
    frame.extend_from_slice(&len_buf);
    frame.extend_from_slice(&payload);
    Ok(frame)
}
