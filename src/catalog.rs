//! Static selection tables
//!
//! Moods, intensity levels and the predefined context tags offered on the
//! context screen. Everything here is immutable and compiled in.

use egui::Color32;

/// Outline drawn for a mood on the mood grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodShape {
    Circle,
    Flower,
    Cloud,
    Star,
    Blob,
    Hexagon,
    CircleCut,
    Triangle,
    SquareRounded,
    CircleOff,
    WavySquare,
    Slice,
}

/// A selectable mood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodOption {
    pub id: &'static str,
    pub label: &'static str,
    pub color: Color32,
    pub shape: MoodShape,
}

/// A selectable intensity level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityOption {
    /// 1 (gentle) through 4 (overwhelming)
    pub id: u8,
    pub label: &'static str,
    /// Tower height on the intensity screen, in points
    pub height: f32,
    pub color: Color32,
    /// Offset of the tower's idle sway, in seconds
    pub delay: f32,
}

pub const MOODS: [MoodOption; 12] = [
    MoodOption { id: "excited", label: "Excited", color: Color32::from_rgb(0xF4, 0xCC, 0xCC), shape: MoodShape::Circle },
    MoodOption { id: "joyful", label: "Joyful", color: Color32::from_rgb(0xE6, 0xB8, 0xAF), shape: MoodShape::Flower },
    MoodOption { id: "grateful", label: "Grateful", color: Color32::from_rgb(0xD5, 0xA6, 0xBD), shape: MoodShape::Cloud },
    MoodOption { id: "energized", label: "Energized", color: Color32::from_rgb(0xC2, 0x7B, 0xA0), shape: MoodShape::Star },
    MoodOption { id: "sensitive", label: "Sensitive", color: Color32::from_rgb(0xA2, 0xC4, 0xC9), shape: MoodShape::Blob },
    MoodOption { id: "confused", label: "Confused", color: Color32::from_rgb(0x76, 0xA5, 0xAF), shape: MoodShape::Hexagon },
    MoodOption { id: "bored", label: "Bored", color: Color32::from_rgb(0x93, 0xC4, 0x7D), shape: MoodShape::CircleCut },
    MoodOption { id: "stressed", label: "Stressed", color: Color32::from_rgb(0x8F, 0xCE, 0x00), shape: MoodShape::Triangle },
    MoodOption { id: "angry", label: "Angry", color: Color32::from_rgb(0xE0, 0x66, 0x66), shape: MoodShape::SquareRounded },
    MoodOption { id: "insecure", label: "Insecure", color: Color32::from_rgb(0xCC, 0x00, 0x00), shape: MoodShape::CircleOff },
    MoodOption { id: "hurt", label: "Hurt", color: Color32::from_rgb(0xB4, 0x5F, 0x06), shape: MoodShape::WavySquare },
    MoodOption { id: "guilty", label: "Guilty", color: Color32::from_rgb(0xF9, 0xCB, 0x9C), shape: MoodShape::Slice },
];

pub const INTENSITIES: [IntensityOption; 4] = [
    IntensityOption { id: 1, label: "Gentle", height: 80.0, color: Color32::from_rgb(0xB0, 0xC4, 0xB1), delay: 0.0 },
    IntensityOption { id: 2, label: "Steady", height: 120.0, color: Color32::from_rgb(0x89, 0xA8, 0x94), delay: 0.2 },
    IntensityOption { id: 3, label: "Intense", height: 160.0, color: Color32::from_rgb(0x6B, 0x8F, 0x7F), delay: 0.4 },
    IntensityOption { id: 4, label: "Overwhelming", height: 200.0, color: Color32::from_rgb(0x4A, 0x6B, 0x5D), delay: 0.6 },
];

/// Quick picks on the context screen; choosing one replaces the typed text
pub const CONTEXT_TAGS: [&str; 6] = [
    "Presentation Soon",
    "Panic Attack",
    "Post Workout",
    "Asthma / Tightness",
    "Need Focus",
    "Can't Sleep",
];

/// Look up a mood by id
pub fn find_mood(id: &str) -> Option<&'static MoodOption> {
    MOODS.iter().find(|m| m.id == id)
}

/// Look up an intensity level by id
pub fn find_intensity(id: u8) -> Option<&'static IntensityOption> {
    INTENSITIES.iter().find(|i| i.id == id)
}
