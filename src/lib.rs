//! Canopy is the timeline evaluation core of a light-show authoring tool.
//!
//! Shows are made of timed [`Block`]s, each running a shader [`Pattern`] whose parameters are
//! animated by [`ParameterTimeline`]s of [`Variation`] segments. Every frame, a block resolves
//! each animated parameter at the transport time and writes the result into its live uniform
//! map, which a renderer uploads to the GPU.
//!
//! - Build a [`PatternCatalog`] once at startup
//! - Place patterns into [`Block`]s and animate parameters
//! - Store and load blocks with [`serialize_block`] / [`deserialize_block`]
//! - Drive previews with a [`PreviewSession`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod pattern;
pub(crate) mod scene;
pub(crate) mod schema;
pub(crate) mod session;

pub use crate::foundation::color::Rgba;
pub use crate::foundation::error::{CanopyError, CanopyResult};

pub use crate::animation::audio::{AudioSignal, AudioVariation};
pub use crate::animation::ease::Easing;
pub use crate::animation::palette::{ColorStop, ColorStopDef, Palette};
pub use crate::animation::periodic::{PeriodicVariation, Waveform};
pub use crate::animation::spline::{SplineCurve, SplinePoint, SplineVariation};
pub use crate::animation::timeline::{ParameterTimeline, VariationId};
pub use crate::animation::variation::{
    EasingVariation, FlatVariation, Lerp, Linear4Variation, LinearVariation, PaletteVariation,
    SampleCtx, Value, ValueKind, Variation, VariationKind, VariationTag,
};
pub use crate::pattern::builtin;
pub use crate::pattern::catalog::PatternCatalog;
pub use crate::pattern::param::{ParamValue, PatternParam};
pub use crate::pattern::template::{
    BASE_UNIFORMS, Pattern, TEXTURE_UNIFORM, TIME_UNIFORM, is_base_uniform,
};
pub use crate::scene::block::Block;
pub use crate::schema::codec::{
    decode_param_value, decode_variation, deserialize_block, encode_param_value, encode_variation,
    serialize_block,
};
pub use crate::schema::model::{
    SerializedBlock, SerializedParam, SerializedPattern, SerializedVariation,
};
pub use crate::session::preview::{
    BlockEdit, PreviewOpts, PreviewSession, PreviewStats, Transport,
};
