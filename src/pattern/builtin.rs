//! Patterns shipped with the engine.

use crate::{
    animation::palette::Palette,
    foundation::color::Rgba,
    pattern::{param::PatternParam, template::Pattern},
};

/// Every builtin pattern, in catalog order.
pub fn all() -> Vec<Pattern> {
    vec![pulse(), melt(), globules(), sun_cycle(), gradient()]
}

/// Concentric hue bands pulsing outward.
pub fn pulse() -> Pattern {
    Pattern::new(
        "Pulse",
        "shaders/pulse.frag",
        [
            (
                "u_time_factor",
                PatternParam::scalar("Time Factor", 0.4).with_max(5.0),
            ),
            (
                "u_time_offset",
                PatternParam::scalar("Time Offset", 0.0)
                    .with_min(-5.0)
                    .with_max(5.0),
            ),
            ("u_hue_start", PatternParam::scalar("Hue Start", 0.0)),
            ("u_hue_width", PatternParam::scalar("Hue Width", 0.8)),
            ("u_saturation", PatternParam::scalar("Saturation", 1.0)),
            ("u_duty_cycle", PatternParam::scalar("Duty Cycle", 0.5)),
            ("u_scale", PatternParam::scalar("Scale", 1.0).with_max(10.0)),
            ("u_wave_period", PatternParam::scalar("Wave Period", 0.25)),
            ("u_wave_amplitude", PatternParam::scalar("Wave Amplitude", 0.0)),
            ("u_waviness", PatternParam::scalar("Waviness", 1.0)),
            ("u_spiral_factor", PatternParam::scalar("Spiral Factor", 0.0)),
            (
                "u_number_colors",
                PatternParam::scalar("Number of Colors", 4.0)
                    .with_min(1.0)
                    .with_max(20.0)
                    .with_step(1.0),
            ),
            (
                "u_white_leading_edge",
                PatternParam::scalar("White Leading Edge", 0.1),
            ),
        ],
    )
}

/// Rotating melt distortion.
pub fn melt() -> Pattern {
    Pattern::new(
        "Melt",
        "shaders/melt.frag",
        [
            (
                "u_time_factor",
                PatternParam::scalar("Time Factor", 1.0)
                    .with_min(-5.0)
                    .with_max(5.0),
            ),
            (
                "u_time_offset",
                PatternParam::scalar("Time Offset", 0.0)
                    .with_min(-5.0)
                    .with_max(5.0),
            ),
            ("u_rotation_speed", PatternParam::scalar("Rotation Speed", 4.0)),
        ],
    )
}

/// Drifting metaballs.
pub fn globules() -> Pattern {
    Pattern::new(
        "Globules",
        "shaders/globules.frag",
        [
            ("u_time_factor", PatternParam::scalar("Time Factor", 1.0)),
            ("u_time_offset", PatternParam::scalar("Time Offset", 0.0)),
        ],
    )
}

/// Sun disc crossing a sky.
pub fn sun_cycle() -> Pattern {
    Pattern::new(
        "SunCycle",
        "shaders/sun_cycle.frag",
        [
            (
                "u_sun_color",
                PatternParam::color("Sun Color", Rgba::rgb(1.0, 0.8, 0.2)),
            ),
            (
                "u_sky_color",
                PatternParam::color("Sky Color", Rgba::rgb(0.1, 0.2, 0.6)),
            ),
            (
                "u_time_factor",
                PatternParam::scalar("Time Factor", 1.0).with_max(5.0),
            ),
        ],
    )
}

/// Scrolling gradient.
pub fn gradient() -> Pattern {
    Pattern::new(
        "Gradient",
        "shaders/gradient.frag",
        [
            (
                "u_palette",
                PatternParam::palette(
                    "Palette",
                    Palette::evenly_spaced(&[
                        Rgba::rgb(1.0, 0.0, 0.0),
                        Rgba::rgb(0.0, 1.0, 0.0),
                        Rgba::rgb(0.0, 0.0, 1.0),
                    ]),
                ),
            ),
            (
                "u_scroll_speed",
                PatternParam::scalar("Scroll Speed", 0.5)
                    .with_min(-5.0)
                    .with_max(5.0),
            ),
        ],
    )
}
