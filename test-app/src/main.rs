// gimbal test application -- CLI tool for exercising the HeQi protocol
// engine against a payload on the network.
//
// Usage:
//   gimbal-cli center
//   gimbal-cli --host 192.168.144.64 --port 5000 move --yaw right --duration-ms 1500
//   gimbal-cli speed --pitch 150 --yaw 5
//   gimbal-cli record start --camera visible
//   gimbal-cli laser on --periodic
//   gimbal-cli monitor --seconds 30
//
// Offline commands (no socket is opened):
//   gimbal-cli encode --seq 7 center
//   gimbal-cli palette-list

mod logging;

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::broadcast::{self, error::RecvError};

use gimbal::heqi::commands;
use gimbal::heqi::{ControlDefaults, Session, SessionBuilder, decode_frame};
use gimbal::{
    AckCode, CameraSelect, Direction, GimbalEvent, GimbalMode, ImageMode, PhotoAction,
    RecordAction, ZoomControl,
};

use crate::logging::{LogLevel, init_logging};

/// How long a one-shot command waits for the payload's ACK.
const ACK_WAIT: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// gimbal test application -- drives a gimbal payload from the command line.
#[derive(Parser)]
#[command(name = "gimbal-cli", version, about)]
struct Cli {
    /// Gimbal control IP address.
    #[arg(long, env = "GIMBAL_HOST", default_value_t = IpAddr::V4(ControlDefaults::PEER_IP))]
    host: IpAddr,

    /// Gimbal control UDP port.
    #[arg(long, env = "GIMBAL_PORT", default_value_t = ControlDefaults::PEER_PORT)]
    port: u16,

    /// Local address telemetry is received on.
    #[arg(long, env = "GIMBAL_BIND", default_value_t = ControlDefaults::bind_addr())]
    bind: SocketAddr,

    /// Log level for library diagnostics (written to stderr).
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Control(Control),

    /// Print decoded events as they arrive.
    Monitor {
        /// Duration in seconds (0 = run until interrupted).
        #[arg(long, default_value_t = 10)]
        seconds: u64,
    },

    /// Print the frame a command would send, without sending it.
    Encode {
        /// Sequence number to stamp into the frame.
        #[arg(long, default_value_t = 1)]
        seq: u8,

        #[command(subcommand)]
        control: Control,
    },

    /// List thermal palette numbers and names.
    PaletteList,
}

/// Commands that produce a frame for the payload.
#[derive(Subcommand)]
enum Control {
    /// Return the gimbal to its home position.
    Center,

    /// Point the camera straight down.
    LookDown,

    /// Stop all gimbal motion.
    Stop,

    /// Drive the gimbal, resending the direction until the duration ends.
    Move {
        /// Yaw direction: left, right or stop.
        #[arg(long, default_value = "stop")]
        yaw: Direction,

        /// Pitch direction: up, down or stop.
        #[arg(long, default_value = "stop")]
        pitch: Direction,

        /// How long to hold the direction, in milliseconds.
        #[arg(long, default_value_t = 1000)]
        duration_ms: u64,

        /// Resend period in milliseconds.
        #[arg(long, default_value_t = ControlDefaults::CONTROL_REPEAT_INTERVAL.as_millis() as u64)]
        interval_ms: u64,
    },

    /// Move to an absolute angle (pitch 0..=90, yaw 0..=180 degrees).
    Angle {
        #[arg(long, default_value_t = 0)]
        pitch: u16,

        #[arg(long, default_value = "down")]
        pitch_dir: Direction,

        #[arg(long, default_value_t = 0)]
        yaw: u16,

        #[arg(long, default_value = "right")]
        yaw_dir: Direction,
    },

    /// Set rocker speed for both axes (clamped to 5..=150).
    Speed {
        #[arg(long, default_value_t = ControlDefaults::SPEED)]
        pitch: u8,

        #[arg(long, default_value_t = ControlDefaults::SPEED)]
        yaw: u8,
    },

    /// Take a photo.
    Photo {
        /// Sensor: default, ir, visible, both.
        #[arg(long, default_value = "default")]
        camera: CameraSelect,

        #[arg(long)]
        folder: Option<String>,

        #[arg(long)]
        file: Option<String>,
    },

    /// Start or stop video recording.
    Record {
        /// start or stop.
        action: RecordAction,

        /// Sensor: default, ir, visible, both, stream.
        #[arg(long, default_value = "default")]
        camera: CameraSelect,

        #[arg(long)]
        folder: Option<String>,

        #[arg(long)]
        file: Option<String>,
    },

    /// Continuous zoom control: in, out, stop, step-in, step-out.
    Zoom { control: ZoomControl },

    /// Select a thermal palette by number (see `palette-list`).
    Palette { number: u8 },

    /// Select the image on the video output: ir, visible, visible-alt, split.
    ImageMode { mode: ImageMode },

    /// Switch the laser rangefinder on or off.
    Laser {
        state: Switch,

        /// Use continuous ranging instead of a single measurement.
        #[arg(long)]
        periodic: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Switch {
    On,
    Off,
}

impl Control {
    /// Build the frame for this command. `Move` yields a single direction
    /// frame; the repeat is handled by the sender.
    fn frame(&self, seq: u8) -> Vec<u8> {
        match self {
            Control::Center => commands::cmd_gimbal_center(seq),
            Control::LookDown => commands::cmd_gimbal_look_down(seq),
            Control::Stop => commands::cmd_gimbal_stop(seq),
            Control::Move { yaw, pitch, .. } => {
                commands::cmd_gimbal_control(seq, GimbalMode::None, *yaw, *pitch)
            }
            Control::Angle {
                pitch,
                pitch_dir,
                yaw,
                yaw_dir,
            } => commands::cmd_gimbal_set_angle(seq, *pitch_dir, *pitch, *yaw_dir, *yaw),
            Control::Speed { pitch, yaw } => commands::cmd_gimbal_set_speed(seq, *pitch, *yaw),
            Control::Photo {
                camera,
                folder,
                file,
            } => commands::cmd_take_photo(
                seq,
                *camera,
                PhotoAction::Shoot,
                folder.as_deref().unwrap_or(""),
                file.as_deref().unwrap_or(""),
            ),
            Control::Record {
                action,
                camera,
                folder,
                file,
            } => commands::cmd_record(
                seq,
                *camera,
                *action,
                folder.as_deref().unwrap_or(""),
                file.as_deref().unwrap_or(""),
            ),
            Control::Zoom { control } => commands::cmd_continuous_zoom(seq, *control),
            Control::Palette { number } => commands::cmd_ir_palette(seq, *number),
            Control::ImageMode { mode } => commands::cmd_set_image_mode(seq, *mode),
            Control::Laser { state, periodic } => {
                let on = *state == Switch::On;
                if *periodic {
                    commands::cmd_laser_periodic_range(seq, on)
                } else {
                    commands::cmd_laser_range(seq, on)
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn message_label(message_id: u32) -> String {
    match commands::message_name(message_id) {
        Some(name) => format!("{name} ({message_id:06X})"),
        None => format!("{message_id:06X}"),
    }
}

/// Wait for the ACK of `message_id`, skipping unrelated events.
async fn wait_for_ack(
    events: &mut broadcast::Receiver<GimbalEvent>,
    message_id: u32,
    wait: Duration,
) -> Option<AckCode> {
    let deadline = tokio::time::Instant::now() + wait;
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        match tokio::time::timeout(remaining, events.recv()).await {
            Ok(Ok(GimbalEvent::Ack {
                message_id: id,
                code,
            })) if id == message_id => return Some(code),
            Ok(Ok(_)) | Ok(Err(RecvError::Lagged(_))) => continue,
            Ok(Err(RecvError::Closed)) | Err(_) => return None,
        }
    }
}

fn describe(event: &GimbalEvent) -> String {
    match event {
        GimbalEvent::GimbalAttitude(a) => format!(
            "attitude  yaw {:>7.2}  pitch {:>7.2}  roll {:>7.2}",
            a.yaw_joint, a.pitch_joint, a.roll_joint
        ),
        GimbalEvent::IrStatus(ir) => format!(
            "ir        max {:.1}C  min {:.1}C  center {:.1}C",
            ir.max_temp, ir.min_temp, ir.center_temp
        ),
        GimbalEvent::VisibleStatus(v) => format!(
            "visible   zoom {:.1}x  focal {:.1} mm  iso {:.0}",
            v.zoom_rate, v.focal_length, v.iso
        ),
        GimbalEvent::Ack { message_id, code } => {
            format!("ack       {} -> {}", message_label(*message_id), code)
        }
        GimbalEvent::RecordStatus(r) => format!(
            "record    {} {} s",
            if r.recording { "recording" } else { "idle" },
            r.elapsed_secs
        ),
        GimbalEvent::LaserRange { meters } => format!("laser     {meters:.1} m"),
        other => format!("{other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Session construction
// ---------------------------------------------------------------------------

async fn create_session(cli: &Cli) -> Result<Session> {
    let session = SessionBuilder::new()
        .peer(SocketAddr::new(cli.host, cli.port))
        .bind_addr(cli.bind)
        .build()
        .context("invalid session settings")?;

    session
        .connect()
        .await
        .with_context(|| format!("failed to open UDP socket on {}", cli.bind))?;

    tracing::info!(peer = %session.peer(), local = ?session.local_addr(), "Session ready");
    Ok(session)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_control(session: &Session, control: &Control) -> Result<()> {
    if let Control::Move {
        yaw,
        pitch,
        duration_ms,
        interval_ms,
    } = control
    {
        return cmd_move(session, *yaw, *pitch, *duration_ms, *interval_ms).await;
    }

    let mut events = session.subscribe();
    let seq = session.next_sequence();
    let frame = control.frame(seq);
    let message_id = decode_frame(&frame)
        .map(|f| f.message_id)
        .context("command produced an invalid frame")?;

    session
        .try_send(&frame)
        .await
        .with_context(|| format!("failed to send to {}", session.peer()))?;
    println!("Sent {} seq {}", message_label(message_id), seq);

    match wait_for_ack(&mut events, message_id, ACK_WAIT).await {
        Some(code) if code.is_ok() => println!("ACK: {code}"),
        Some(code) => bail!("{} rejected: {}", message_label(message_id), code),
        None => println!("No ACK within {} ms", ACK_WAIT.as_millis()),
    }
    Ok(())
}

async fn cmd_move(
    session: &Session,
    yaw: Direction,
    pitch: Direction,
    duration_ms: u64,
    interval_ms: u64,
) -> Result<()> {
    if interval_ms == 0 {
        bail!("--interval-ms must be greater than zero");
    }

    println!("Moving yaw {yaw}, pitch {pitch} for {duration_ms} ms...");

    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
    let until = tokio::time::Instant::now() + Duration::from_millis(duration_ms);
    let mut sent = 0u32;

    while tokio::time::Instant::now() < until {
        ticker.tick().await;
        let frame =
            commands::cmd_gimbal_control(session.next_sequence(), GimbalMode::None, yaw, pitch);
        if let Err(e) = session.try_send(&frame).await {
            // Never leave the gimbal moving.
            session.send_command(commands::cmd_gimbal_stop).await;
            return Err(e).context(format!("control frame {} failed", sent + 1));
        }
        sent += 1;
    }

    session
        .try_send(&commands::cmd_gimbal_stop(session.next_sequence()))
        .await?;
    println!("Sent {sent} control frames, then stop.");
    Ok(())
}

async fn cmd_monitor(session: &Session, seconds: u64) -> Result<()> {
    let mut events = session.subscribe();

    // The payload streams telemetry to whoever last sent it something.
    session.try_send(&commands::cmd_gimbal_version(session.next_sequence())).await?;

    println!("Monitoring {} (Ctrl-C to stop)...", session.peer());

    let deadline = (seconds > 0)
        .then(|| tokio::time::Instant::now() + Duration::from_secs(seconds));
    let start = tokio::time::Instant::now();

    loop {
        let timeout = match deadline {
            Some(dl) => {
                let remaining = dl.saturating_duration_since(tokio::time::Instant::now());
                if remaining.is_zero() {
                    println!("Monitor duration elapsed.");
                    break;
                }
                remaining
            }
            None => Duration::from_secs(3600),
        };

        match tokio::time::timeout(timeout, events.recv()).await {
            Ok(Ok(event)) => {
                let elapsed = start.elapsed();
                println!(
                    "{:>6}.{:03}s {}",
                    elapsed.as_secs(),
                    elapsed.subsec_millis(),
                    describe(&event)
                );
            }
            Ok(Err(RecvError::Lagged(n))) => {
                println!("[warning] missed {n} events (consumer too slow)");
            }
            Ok(Err(RecvError::Closed)) => {
                println!("Event channel closed.");
                break;
            }
            Err(_) => {
                if deadline.is_some() {
                    println!("Monitor duration elapsed.");
                }
                break;
            }
        }
    }

    Ok(())
}

fn cmd_encode(control: &Control, seq: u8) -> Result<()> {
    let frame = control.frame(seq);
    let decoded = decode_frame(&frame).context("command produced an invalid frame")?;
    println!("{}", hex(&frame));
    println!(
        "{}, seq {}, {} payload bytes",
        message_label(decoded.message_id),
        decoded.sequence,
        decoded.payload.len()
    );
    Ok(())
}

fn cmd_palette_list() -> Result<()> {
    println!("{:<4} Palette", "No.");
    println!("{:-<4} {:-<24}", "", "");
    for (i, name) in commands::IR_PALETTES.iter().enumerate() {
        println!("{:<4} {}", i + 1, name);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    // Offline commands do not open a socket.
    match &cli.command {
        Command::Encode { seq, control } => return cmd_encode(control, *seq),
        Command::PaletteList => return cmd_palette_list(),
        _ => {}
    }

    let session = create_session(&cli).await?;

    let result = match &cli.command {
        Command::Control(control) => cmd_control(&session, control).await,
        Command::Monitor { seconds } => cmd_monitor(&session, *seconds).await,
        Command::Encode { .. } => unreachable!("encode handled above"),
        Command::PaletteList => unreachable!("palette-list handled above"),
    };

    session.disconnect().await;
    result
}
