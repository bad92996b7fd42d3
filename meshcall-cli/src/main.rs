use anyhow::Result;
use clap::Parser;
use colored::*;
use meshcall_core::RoomId;
use meshcall_session::{
    RoomSession, RtcTransportFactory, SessionConfig, SessionEvent, SyntheticMediaSource,
    WsSignaling,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

/// Terminal client: joins a room over a WebSocket signaling relay with
/// synthetic media tracks and prints session events.
#[derive(Parser)]
#[command(name = "meshcall")]
struct Cli {
    /// Signaling relay URL.
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Room to join.
    #[arg(long)]
    room: String,

    /// Local stream id (used to label synthetic tracks).
    #[arg(long)]
    stream_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meshcall_session=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let stream_id = cli
        .stream_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let (signaling, signal_rx) = WsSignaling::connect(&cli.url).await?;
    let media = Arc::new(SyntheticMediaSource::new(stream_id));
    let factory = Arc::new(RtcTransportFactory::new(
        SessionConfig::default().transport,
    ));

    let (handle, mut events) = RoomSession::connect(
        RoomId::from(cli.room.clone()),
        SessionConfig::default(),
        Arc::new(signaling),
        signal_rx,
        media,
        factory,
    )
    .await?;

    println!("{} {}", "joined room".green().bold(), cli.room.cyan());
    println!(
        "commands: {}",
        "share | stop | mute | unmute | cam-off | cam-on | leave".yellow()
    );

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match event {
                    SessionEvent::PeerJoined { peer_id } => {
                        println!("{} {peer_id}", "peer joined:".green());
                    }
                    SessionEvent::PeerLeft { peer_id } => {
                        println!("{} {peer_id}", "peer left:".red());
                    }
                    SessionEvent::RemoteTrack { peer_id, track } => {
                        println!("{} {} from {peer_id}", "remote track:".cyan(), track.id());
                    }
                    SessionEvent::ScreenShareStarted => {
                        println!("{}", "screen share started".yellow());
                    }
                    SessionEvent::ScreenShareStopped => {
                        println!("{}", "screen share stopped".yellow());
                    }
                    SessionEvent::TransportLost => {
                        println!("{}", "signaling lost, session closed".red().bold());
                        return Ok(());
                    }
                }
            }

            line = stdin.next_line() => {
                let Ok(Some(line)) = line else { break };
                match line.trim() {
                    "share" => handle.start_screen_share().await,
                    "stop" => handle.stop_screen_share().await,
                    "mute" => handle.set_audio_enabled(false).await,
                    "unmute" => handle.set_audio_enabled(true).await,
                    "cam-off" => handle.set_video_enabled(false).await,
                    "cam-on" => handle.set_video_enabled(true).await,
                    "leave" => break,
                    "" => {}
                    other => println!("unknown command: {other}"),
                }
            }
        }
    }

    handle.leave().await;
    println!("{}", "left room".green().bold());
    Ok(())
}
