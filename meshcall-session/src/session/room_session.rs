use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::media::{LocalMedia, MediaSource, TrackRouter};
use crate::peer::PeerRegistry;
use crate::session::session_command::SessionCommand;
use crate::session::session_event::SessionEvent;
use crate::signaling::SignalingOutput;
use crate::transport::{TransportEvent, TransportFactory};
use meshcall_core::{PeerId, RoomId, SdpKind, ServerMessage, SessionDescription, SignalPayload};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Owner-side handle to a running room session. Dropping it without calling
/// `leave` aborts nothing; the loop keeps running until signaling drops.
pub struct SessionHandle {
    command_tx: mpsc::Sender<SessionCommand>,
    registry: Arc<PeerRegistry>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn registry(&self) -> &Arc<PeerRegistry> {
        &self.registry
    }

    pub async fn start_screen_share(&self) {
        let _ = self.command_tx.send(SessionCommand::StartScreenShare).await;
    }

    pub async fn stop_screen_share(&self) {
        let _ = self.command_tx.send(SessionCommand::StopScreenShare).await;
    }

    pub async fn set_audio_enabled(&self, enabled: bool) {
        let _ = self
            .command_tx
            .send(SessionCommand::SetAudioEnabled(enabled))
            .await;
    }

    pub async fn set_video_enabled(&self, enabled: bool) {
        let _ = self
            .command_tx
            .send(SessionCommand::SetVideoEnabled(enabled))
            .await;
    }

    /// Leave the room and wait for the session loop to finish its teardown.
    pub async fn leave(self) {
        let _ = self.command_tx.send(SessionCommand::Leave).await;
        let _ = self.task.await;
    }
}

/// Orchestrates one room: reacts to membership events and inbound signals,
/// drives the registry and the per-peer negotiation state machines, and is
/// the only component that talks to the signaling transport.
pub struct RoomSession {
    room_id: RoomId,
    registry: Arc<PeerRegistry>,
    router: TrackRouter,
    media: LocalMedia,
    media_source: Arc<dyn MediaSource>,
    signaling: Arc<dyn SignalingOutput>,
    command_rx: mpsc::Receiver<SessionCommand>,
    signal_rx: mpsc::Receiver<ServerMessage>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    event_tx: mpsc::Sender<SessionEvent>,
    screen_sharing: bool,
}

impl RoomSession {
    /// Join a room: acquire local media (fatal on failure, no connections are
    /// created), announce presence, and spawn the session loop.
    pub async fn connect(
        room_id: RoomId,
        config: SessionConfig,
        signaling: Arc<dyn SignalingOutput>,
        signal_rx: mpsc::Receiver<ServerMessage>,
        media_source: Arc<dyn MediaSource>,
        factory: Arc<dyn TransportFactory>,
    ) -> Result<(SessionHandle, mpsc::Receiver<SessionEvent>), SessionError> {
        let media = media_source
            .acquire()
            .await
            .map_err(SessionError::MediaAcquisition)?;

        let (transport_tx, transport_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::channel(32);
        let (event_tx, event_rx) = mpsc::channel(256);

        let registry = Arc::new(PeerRegistry::new(
            factory,
            media.clone(),
            transport_tx,
            config,
        ));

        info!("joining room {room_id}");
        signaling.announce_join(room_id.clone()).await;

        let session = RoomSession {
            room_id,
            registry: registry.clone(),
            router: TrackRouter::new(registry.clone()),
            media,
            media_source,
            signaling,
            command_rx,
            signal_rx,
            transport_rx,
            event_tx,
            screen_sharing: false,
        };
        let task = tokio::spawn(session.run());

        Ok((
            SessionHandle {
                command_tx,
                registry,
                task,
            },
            event_rx,
        ))
    }

    async fn run(mut self) {
        info!("session loop started for room {}", self.room_id);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(SessionCommand::Leave) | None => {
                            self.shutdown(true).await;
                            break;
                        }
                        Some(cmd) => self.handle_command(cmd).await,
                    }
                }

                msg = self.signal_rx.recv() => {
                    match msg {
                        Some(msg) => self.handle_signal(msg).await,
                        None => {
                            warn!("signaling channel lost, tearing down room {}", self.room_id);
                            self.emit(SessionEvent::TransportLost).await;
                            self.shutdown(false).await;
                            break;
                        }
                    }
                }

                evt = self.transport_rx.recv() => {
                    // The registry holds a sender, so this arm never yields None
                    // while the session is alive.
                    if let Some(evt) = evt {
                        self.handle_transport_event(evt).await;
                    }
                }
            }
        }

        info!("session loop finished for room {}", self.room_id);
    }

    async fn handle_signal(&mut self, msg: ServerMessage) {
        match msg {
            ServerMessage::PeerJoined { peer_id } => {
                info!("peer joined: {peer_id}");
                let conn = match self.registry.get_or_create(&peer_id).await {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!("could not set up connection for {peer_id}: {e}");
                        return;
                    }
                };
                self.emit(SessionEvent::PeerJoined {
                    peer_id: peer_id.clone(),
                })
                .await;

                // We were notified of the join, so we originate the offer.
                match conn.initiate_offer().await {
                    Ok(Some(offer)) => {
                        self.signaling
                            .send_signal(peer_id, SignalPayload::Sdp { sdp: offer })
                            .await;
                    }
                    Ok(None) => {}
                    Err(e) => warn!("offer creation failed for {}: {e}", conn.peer_id()),
                }
            }

            ServerMessage::Signal { from, signal } => {
                let known = self.registry.contains(&from);
                let conn = match self.registry.get_or_create(&from).await {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!("could not set up connection for {from}: {e}");
                        return;
                    }
                };
                if !known {
                    self.emit(SessionEvent::PeerJoined {
                        peer_id: from.clone(),
                    })
                    .await;
                }

                match signal {
                    SignalPayload::Sdp { sdp } => self.handle_remote_sdp(&from, sdp).await,
                    SignalPayload::Candidate { candidate } => {
                        conn.add_remote_candidate(candidate).await;
                    }
                }
            }

            ServerMessage::PeerLeft { peer_id } => {
                info!("peer left: {peer_id}");
                self.registry.remove(&peer_id).await;
                self.emit(SessionEvent::PeerLeft { peer_id }).await;
            }
        }
    }

    async fn handle_remote_sdp(&mut self, from: &PeerId, sdp: SessionDescription) {
        let Some(conn) = self.registry.get(from) else {
            debug!("sdp for unknown peer {from}, ignoring");
            return;
        };

        match sdp.kind {
            SdpKind::Offer => match conn.apply_remote_offer(sdp).await {
                Ok(Some(answer)) => {
                    self.signaling
                        .send_signal(from.clone(), SignalPayload::Sdp { sdp: answer })
                        .await;
                }
                Ok(None) => {}
                Err(e) => warn!("failed to answer offer from {from}: {e}"),
            },
            SdpKind::Answer => {
                if let Err(e) = conn.apply_remote_answer(sdp).await {
                    warn!("failed to apply answer from {from}: {e}");
                }
            }
        }
    }

    async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::CandidateGenerated(peer_id, candidate) => {
                // A step that completes after removal must not act for the
                // removed peer.
                if !self.registry.contains(&peer_id) {
                    debug!("candidate generated for removed peer {peer_id}, dropping");
                    return;
                }
                self.signaling
                    .send_signal(peer_id, SignalPayload::Candidate { candidate })
                    .await;
            }

            TransportEvent::RemoteTrack(peer_id, track) => {
                if !self.registry.contains(&peer_id) {
                    debug!("remote track from removed peer {peer_id}, dropping");
                    return;
                }
                self.emit(SessionEvent::RemoteTrack { peer_id, track }).await;
            }

            TransportEvent::Disconnected(peer_id) => {
                if !self.registry.contains(&peer_id) {
                    return;
                }
                info!("transport disconnected for {peer_id}");
                self.registry.remove(&peer_id).await;
                self.emit(SessionEvent::PeerLeft { peer_id }).await;
            }
        }
    }

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::StartScreenShare => {
                let screen = match self.media_source.acquire_screen().await {
                    Ok(track) => track,
                    Err(e) => {
                        warn!("screen capture failed: {e:#}");
                        return;
                    }
                };
                self.router.replace_outbound_video(screen).await;
                self.screen_sharing = true;
                self.emit(SessionEvent::ScreenShareStarted).await;
            }

            SessionCommand::StopScreenShare => {
                if !self.screen_sharing {
                    return;
                }
                self.router.revert_to_camera(self.media.video.clone()).await;
                self.screen_sharing = false;
                self.emit(SessionEvent::ScreenShareStopped).await;
            }

            SessionCommand::SetAudioEnabled(enabled) => {
                self.media_source.set_audio_enabled(enabled);
            }

            SessionCommand::SetVideoEnabled(enabled) => {
                self.media_source.set_video_enabled(enabled);
            }

            // Intercepted by the select loop before we get here.
            SessionCommand::Leave => {}
        }
    }

    /// Teardown, in order: tell the room we are leaving, stop local capture,
    /// close every connection, release the signaling session. Peers must see
    /// the leave announcement no later than the connection drop.
    async fn shutdown(&mut self, announce: bool) {
        if announce {
            info!("leaving room {}", self.room_id);
            self.signaling.announce_leave(self.room_id.clone()).await;
        }

        self.media_source.stop().await;
        self.registry.close_all().await;
        self.signaling.close().await;
    }

    async fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).await.is_err() {
            debug!("session event receiver dropped");
        }
    }
}
