use crate::pattern::param::PatternParam;
use std::collections::BTreeMap;

/// Uniform holding block-local time, written on every update.
pub const TIME_UNIFORM: &str = "u_time";
/// Uniform holding the input texture, bound by the renderer.
pub const TEXTURE_UNIFORM: &str = "u_texture";
/// Uniforms every pattern carries; they are driven by the engine and never stored.
pub const BASE_UNIFORMS: [&str; 2] = [TIME_UNIFORM, TEXTURE_UNIFORM];

/// Shader template plus its parameter declarations.
///
/// Cloning is a full deep copy; blocks own their pattern outright.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    name: String,
    shader: String,
    params: BTreeMap<String, PatternParam>,
}

impl Pattern {
    /// Build a pattern. The base uniforms are added first, so `params` may override their
    /// labels.
    pub fn new<K: Into<String>>(
        name: impl Into<String>,
        shader: impl Into<String>,
        params: impl IntoIterator<Item = (K, PatternParam)>,
    ) -> Self {
        let mut all = BTreeMap::new();
        all.insert(TIME_UNIFORM.to_owned(), PatternParam::scalar("Time", 0.0));
        all.insert(
            TEXTURE_UNIFORM.to_owned(),
            PatternParam::external("Input Texture"),
        );
        all.extend(params.into_iter().map(|(k, p)| (k.into(), p)));
        Self {
            name: name.into(),
            shader: shader.into(),
            params: all,
        }
    }

    /// Unique catalog key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fragment shader source reference.
    pub fn shader(&self) -> &str {
        &self.shader
    }

    /// All parameters, keyed by uniform name.
    pub fn params(&self) -> &BTreeMap<String, PatternParam> {
        &self.params
    }

    /// Parameter bound to `uniform`.
    pub fn param(&self, uniform: &str) -> Option<&PatternParam> {
        self.params.get(uniform)
    }

    pub(crate) fn param_mut(&mut self, uniform: &str) -> Option<&mut PatternParam> {
        self.params.get_mut(uniform)
    }

    /// Parameters a user can edit and animate (everything but the base uniforms).
    pub fn user_params(&self) -> impl Iterator<Item = (&str, &PatternParam)> {
        self.params
            .iter()
            .filter(|(k, _)| !is_base_uniform(k))
            .map(|(k, p)| (k.as_str(), p))
    }
}

/// Return `true` for uniforms the engine drives itself.
pub fn is_base_uniform(uniform: &str) -> bool {
    BASE_UNIFORMS.contains(&uniform)
}
