//! Command parameter types.
//!
//! Each enum maps one-to-one onto the byte value the gimbal expects in the
//! corresponding payload field. Using enums instead of raw bytes makes the
//! out-of-range values unrepresentable; fields that are genuinely numeric
//! (speeds, palettes, bitrate levels) stay integers and are clamped by the
//! command builders.

use std::fmt;
use std::str::FromStr;

/// Error returned when a string cannot be parsed into a parameter enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseParamError {
    kind: &'static str,
    value: String,
}

impl ParseParamError {
    fn new(kind: &'static str, value: &str) -> Self {
        ParseParamError {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for ParseParamError {}

/// Motion direction on one gimbal axis.
///
/// The wire encoding is axis-relative: on the yaw axis `Negative` is left
/// and `Positive` is right; on the pitch axis `Negative` is up and
/// `Positive` is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Left (yaw) or up (pitch).
    Negative,
    /// Right (yaw) or down (pitch).
    Positive,
    /// No motion on this axis.
    #[default]
    Stop,
}

impl Direction {
    /// Yaw axis, turn left.
    pub const LEFT: Direction = Direction::Negative;
    /// Yaw axis, turn right.
    pub const RIGHT: Direction = Direction::Positive;
    /// Pitch axis, tilt up.
    pub const UP: Direction = Direction::Negative;
    /// Pitch axis, tilt down.
    pub const DOWN: Direction = Direction::Positive;

    /// Wire byte for this direction.
    pub fn code(self) -> u8 {
        match self {
            Direction::Negative => 0,
            Direction::Positive => 1,
            Direction::Stop => 2,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Negative => "negative",
            Direction::Positive => "positive",
            Direction::Stop => "stop",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Direction {
    type Err = ParseParamError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "negative" | "neg" | "left" | "up" => Ok(Direction::Negative),
            "positive" | "pos" | "right" | "down" => Ok(Direction::Positive),
            "stop" | "none" => Ok(Direction::Stop),
            _ => Err(ParseParamError::new("direction", s)),
        }
    }
}

/// Gimbal work mode carried in the high nibble of the control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GimbalMode {
    /// Plain rate control, no preset motion.
    #[default]
    None,
    /// Return both axes to center.
    Center,
    /// Point straight down (pitch 90°).
    LookDown,
}

impl GimbalMode {
    /// Wire byte for this mode.
    pub fn code(self) -> u8 {
        match self {
            GimbalMode::None => 0x00,
            GimbalMode::Center => 0x10,
            GimbalMode::LookDown => 0x20,
        }
    }
}

/// Which sensor(s) a capture command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraSelect {
    /// Camera default (whatever is on screen).
    #[default]
    Default,
    /// Thermal sensor only.
    Infrared,
    /// Visible-light sensor only.
    Visible,
    /// Thermal and visible together.
    InfraredAndVisible,
    /// Record the encoded output stream (record command only).
    StreamCapture,
}

impl CameraSelect {
    /// Wire byte for this selection.
    pub fn code(self) -> u8 {
        match self {
            CameraSelect::Default => 0,
            CameraSelect::Infrared => 1,
            CameraSelect::Visible => 2,
            CameraSelect::InfraredAndVisible => 3,
            CameraSelect::StreamCapture => 4,
        }
    }
}

impl FromStr for CameraSelect {
    type Err = ParseParamError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(CameraSelect::Default),
            "ir" | "infrared" => Ok(CameraSelect::Infrared),
            "visible" | "eo" => Ok(CameraSelect::Visible),
            "both" | "ir+visible" => Ok(CameraSelect::InfraredAndVisible),
            "stream" => Ok(CameraSelect::StreamCapture),
            _ => Err(ParseParamError::new("camera", s)),
        }
    }
}

/// Photo trigger action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhotoAction {
    /// Take a single photo, or start a burst/timelapse sequence.
    #[default]
    Shoot,
    /// Stop a running burst/timelapse sequence.
    Stop,
}

impl PhotoAction {
    /// Wire byte for this action.
    pub fn code(self) -> u8 {
        match self {
            PhotoAction::Shoot => 0,
            PhotoAction::Stop => 1,
        }
    }
}

/// Video recording action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordAction {
    Start,
    Stop,
}

impl RecordAction {
    /// Wire byte for this action.
    pub fn code(self) -> u8 {
        match self {
            RecordAction::Start => 1,
            RecordAction::Stop => 2,
        }
    }
}

impl FromStr for RecordAction {
    type Err = ParseParamError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(RecordAction::Start),
            "stop" => Ok(RecordAction::Stop),
            _ => Err(ParseParamError::new("record action", s)),
        }
    }
}

/// Photo or video capture mode of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptureMode {
    #[default]
    Photo,
    Record,
}

impl CaptureMode {
    /// Wire byte for this mode.
    pub fn code(self) -> u8 {
        match self {
            CaptureMode::Photo => 0,
            CaptureMode::Record => 1,
        }
    }
}

/// Still-photo shooting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhotoMode {
    #[default]
    Single,
    Burst,
    Timelapse,
}

impl PhotoMode {
    /// Wire byte for this mode.
    pub fn code(self) -> u8 {
        match self {
            PhotoMode::Single => 0x00,
            PhotoMode::Burst => 0x01,
            PhotoMode::Timelapse => 0x02,
        }
    }
}

/// Continuous hybrid zoom control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoomControl {
    /// Zoom in until stopped.
    InContinuous,
    /// Zoom out until stopped.
    OutContinuous,
    /// Stop a continuous zoom.
    Stop,
    /// One step in.
    StepIn,
    /// One step out.
    StepOut,
}

impl ZoomControl {
    /// Wire byte for this control.
    pub fn code(self) -> u8 {
        match self {
            ZoomControl::InContinuous => 0x00,
            ZoomControl::OutContinuous => 0x01,
            ZoomControl::Stop => 0x02,
            ZoomControl::StepIn => 0x03,
            ZoomControl::StepOut => 0x04,
        }
    }
}

impl FromStr for ZoomControl {
    type Err = ParseParamError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in" => Ok(ZoomControl::InContinuous),
            "out" => Ok(ZoomControl::OutContinuous),
            "stop" => Ok(ZoomControl::Stop),
            "step-in" => Ok(ZoomControl::StepIn),
            "step-out" => Ok(ZoomControl::StepOut),
            _ => Err(ParseParamError::new("zoom control", s)),
        }
    }
}

/// Image shown on the video output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageMode {
    Infrared,
    #[default]
    Visible,
    /// Alternate visible-light layout (wide lens on some firmware).
    VisibleAlt,
    /// Side-by-side thermal and visible.
    Split,
}

impl ImageMode {
    /// Wire byte for this mode.
    pub fn code(self) -> u8 {
        match self {
            ImageMode::Infrared => 0x00,
            ImageMode::Visible => 0x05,
            ImageMode::VisibleAlt => 0x06,
            ImageMode::Split => 0x07,
        }
    }

    /// The mode the on-screen "switch image" control cycles to next.
    pub fn next(self) -> ImageMode {
        match self {
            ImageMode::Visible | ImageMode::VisibleAlt => ImageMode::Infrared,
            ImageMode::Infrared => ImageMode::Split,
            ImageMode::Split => ImageMode::Visible,
        }
    }

    /// The sensor a capture should target while this image is displayed.
    pub fn capture_camera(self) -> CameraSelect {
        match self {
            ImageMode::Infrared => CameraSelect::Infrared,
            ImageMode::Visible | ImageMode::VisibleAlt => CameraSelect::Visible,
            ImageMode::Split => CameraSelect::InfraredAndVisible,
        }
    }
}

impl FromStr for ImageMode {
    type Err = ParseParamError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ir" | "infrared" => Ok(ImageMode::Infrared),
            "visible" | "eo" => Ok(ImageMode::Visible),
            "visible-alt" => Ok(ImageMode::VisibleAlt),
            "split" => Ok(ImageMode::Split),
            _ => Err(ParseParamError::new("image mode", s)),
        }
    }
}

/// Lens used as the reference for a point-to-aim command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LensType {
    #[default]
    Telephoto,
    Wide,
    Infrared,
}

impl LensType {
    /// Wire byte for this lens.
    pub fn code(self) -> u8 {
        match self {
            LensType::Telephoto => 0,
            LensType::Wide => 1,
            LensType::Infrared => 2,
        }
    }
}

/// Video output codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VideoCodec {
    #[default]
    H264,
    H265,
}

impl VideoCodec {
    /// Wire byte for this codec.
    pub fn code(self) -> u8 {
        match self {
            VideoCodec::H264 => 0,
            VideoCodec::H265 => 1,
        }
    }
}

/// Video output resolution and frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputResolution {
    #[default]
    Fhd1080p30,
    Hd720p30,
}

impl OutputResolution {
    /// Wire byte for this resolution.
    pub fn code(self) -> u8 {
        match self {
            OutputResolution::Fhd1080p30 => 1,
            OutputResolution::Hd720p30 => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_codes() {
        assert_eq!(Direction::Negative.code(), 0);
        assert_eq!(Direction::Positive.code(), 1);
        assert_eq!(Direction::Stop.code(), 2);
    }

    #[test]
    fn direction_axis_aliases() {
        assert_eq!(Direction::LEFT, Direction::UP);
        assert_eq!(Direction::RIGHT, Direction::DOWN);
        assert_eq!(Direction::default(), Direction::Stop);
    }

    #[test]
    fn direction_from_str() {
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Negative);
        assert_eq!("DOWN".parse::<Direction>().unwrap(), Direction::Positive);
        assert_eq!("stop".parse::<Direction>().unwrap(), Direction::Stop);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn gimbal_mode_codes() {
        assert_eq!(GimbalMode::None.code(), 0x00);
        assert_eq!(GimbalMode::Center.code(), 0x10);
        assert_eq!(GimbalMode::LookDown.code(), 0x20);
    }

    #[test]
    fn record_action_codes() {
        assert_eq!(RecordAction::Start.code(), 1);
        assert_eq!(RecordAction::Stop.code(), 2);
    }

    #[test]
    fn zoom_control_codes_cover_zero_to_four() {
        let codes: Vec<u8> = [
            ZoomControl::InContinuous,
            ZoomControl::OutContinuous,
            ZoomControl::Stop,
            ZoomControl::StepIn,
            ZoomControl::StepOut,
        ]
        .iter()
        .map(|z| z.code())
        .collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn image_mode_cycle() {
        assert_eq!(ImageMode::Visible.next(), ImageMode::Infrared);
        assert_eq!(ImageMode::Infrared.next(), ImageMode::Split);
        assert_eq!(ImageMode::Split.next(), ImageMode::Visible);
    }

    #[test]
    fn image_mode_capture_camera() {
        assert_eq!(ImageMode::Infrared.capture_camera(), CameraSelect::Infrared);
        assert_eq!(ImageMode::Visible.capture_camera(), CameraSelect::Visible);
        assert_eq!(
            ImageMode::Split.capture_camera(),
            CameraSelect::InfraredAndVisible
        );
    }

    #[test]
    fn parse_error_display() {
        let err = "sideways".parse::<Direction>().unwrap_err();
        assert_eq!(err.to_string(), "unknown direction: sideways");
    }
}
