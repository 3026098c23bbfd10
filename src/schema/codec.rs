use crate::{
    animation::{
        palette::Palette,
        variation::{Variation, VariationKind, VariationTag},
    },
    foundation::{
        color::Rgba,
        error::{CanopyError, CanopyResult},
    },
    pattern::{catalog::PatternCatalog, param::ParamValue},
    scene::block::Block,
    schema::model::{SerializedBlock, SerializedParam, SerializedPattern, SerializedVariation},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;
use std::collections::BTreeMap;

/// Convert a block to its stored form.
///
/// A parameter is stored when its static value differs from the pattern default or when it
/// is animated; everything else is rebuilt from the catalog on load.
///
/// Static colors and palette stops are stored as hex, so their channels are rounded to 8 bits
/// (`0.3` reloads as `77 / 255`). A block that was loaded once serializes back unchanged.
pub fn serialize_block(block: &Block) -> CanopyResult<SerializedBlock> {
    let mut params = BTreeMap::new();
    for (uniform, default, value) in block.static_params() {
        let timeline = block.timeline(uniform);
        let animated = timeline.is_some_and(|t| !t.is_empty());
        if value == default && !animated {
            continue;
        }

        let variations = timeline
            .into_iter()
            .flat_map(|t| t.variations())
            .map(encode_variation)
            .collect::<CanopyResult<Vec<_>>>()?;
        params.insert(
            uniform.to_owned(),
            SerializedParam {
                value: Some(encode_param_value(value)?),
                variations,
            },
        );
    }

    Ok(SerializedBlock {
        pattern: SerializedPattern {
            name: block.pattern().name().to_owned(),
            params,
        },
        start_time: block.start_time,
        duration: block.duration,
        render_offset: block.render_offset,
    })
}

/// Rebuild a block from its stored form against `catalog`.
///
/// Stored parameters the pattern no longer declares are skipped with a warning.
#[tracing::instrument(skip(stored, catalog), fields(pattern = %stored.pattern.name))]
pub fn deserialize_block(
    stored: &SerializedBlock,
    catalog: &PatternCatalog,
) -> CanopyResult<Block> {
    let pattern = catalog.require(&stored.pattern.name)?;
    let mut block = Block::new(pattern, stored.start_time, stored.duration);
    block.render_offset = stored.render_offset;

    for (uniform, param) in &stored.pattern.params {
        let Some(default) = block.default_value(uniform) else {
            tracing::warn!(
                uniform = %uniform,
                "skipping stored parameter the pattern does not declare"
            );
            continue;
        };

        if let Some(json) = param.value.as_ref().filter(|v| !v.is_null()) {
            let value = decode_param_value(uniform, default, json)?;
            block.set_param_value(uniform, value)?;
        }
        for stored_variation in &param.variations {
            block.add_variation(uniform, decode_variation(stored_variation)?)?;
        }
    }
    Ok(block)
}

/// Stored JSON form of a parameter value.
pub fn encode_param_value(value: &ParamValue) -> CanopyResult<Json> {
    Ok(match value {
        ParamValue::Scalar(v) => Json::from(*v),
        ParamValue::Color(c) => Json::String(c.to_hex()),
        ParamValue::Palette(p) => serde_json::to_value(p)
            .map_err(|e| CanopyError::serde(format!("encode palette: {e}")))?,
        ParamValue::External => Json::Null,
    })
}

/// Parse a stored parameter value, using `default` to decide its kind.
pub fn decode_param_value(
    uniform: &str,
    default: &ParamValue,
    json: &Json,
) -> CanopyResult<ParamValue> {
    let mismatch = |found: &'static str| CanopyError::ValueKindMismatch {
        uniform: uniform.to_owned(),
        expected: default.kind_name(),
        found,
    };

    match default {
        ParamValue::Scalar(_) => json
            .as_f64()
            .map(ParamValue::Scalar)
            .ok_or_else(|| mismatch(json_kind(json))),
        ParamValue::Color(_) => {
            if !json.is_string() && !json.is_object() && !json.is_array() {
                return Err(mismatch(json_kind(json)));
            }
            from_json::<Rgba>(json, uniform).map(ParamValue::Color)
        }
        ParamValue::Palette(_) => {
            if !json.is_array() {
                return Err(mismatch(json_kind(json)));
            }
            from_json::<Palette>(json, uniform).map(ParamValue::Palette)
        }
        ParamValue::External => Ok(ParamValue::External),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "scalar",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn from_json<T: DeserializeOwned>(json: &Json, what: &str) -> CanopyResult<T> {
    T::deserialize(json).map_err(|e| CanopyError::serde(format!("decode {what}: {e}")))
}

fn to_fields<T: Serialize>(payload: &T) -> CanopyResult<serde_json::Map<String, Json>> {
    match serde_json::to_value(payload) {
        Ok(Json::Object(map)) => Ok(map),
        Ok(other) => Err(CanopyError::serde(format!(
            "variation payload must encode as an object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(CanopyError::serde(format!("encode variation: {e}"))),
    }
}

/// Stored form of one variation.
pub fn encode_variation(variation: &Variation) -> CanopyResult<SerializedVariation> {
    let fields = match &variation.kind {
        VariationKind::Flat(v) => to_fields(v)?,
        VariationKind::Linear(v) => to_fields(v)?,
        VariationKind::Linear4(v) => to_fields(v)?,
        VariationKind::Periodic(v) => to_fields(v)?,
        VariationKind::Spline(v) => to_fields(v)?,
        VariationKind::Easing(v) => to_fields(v)?,
        VariationKind::Palette(v) => to_fields(v)?,
        VariationKind::Audio(v) => to_fields(v)?,
    };
    Ok(SerializedVariation {
        kind: variation.tag().as_str().to_owned(),
        duration: variation.duration,
        fields,
    })
}

/// Parse one stored variation.
///
/// Unknown kind tags and non-positive durations are rejected here rather than at evaluation.
pub fn decode_variation(stored: &SerializedVariation) -> CanopyResult<Variation> {
    let tag = VariationTag::parse(&stored.kind)
        .ok_or_else(|| CanopyError::UnknownVariationKind(stored.kind.clone()))?;
    if !stored.duration.is_finite() || stored.duration <= 0.0 {
        return Err(CanopyError::InvalidDuration(stored.duration));
    }

    let fields = Json::Object(stored.fields.clone());
    let what = format!("{} variation", tag.as_str());
    let kind = match tag {
        VariationTag::Flat => VariationKind::Flat(from_json(&fields, &what)?),
        VariationTag::Linear => VariationKind::Linear(from_json(&fields, &what)?),
        VariationTag::Linear4 => VariationKind::Linear4(from_json(&fields, &what)?),
        VariationTag::Periodic => VariationKind::Periodic(from_json(&fields, &what)?),
        VariationTag::Spline => VariationKind::Spline(from_json(&fields, &what)?),
        VariationTag::Easing => VariationKind::Easing(from_json(&fields, &what)?),
        VariationTag::Palette => VariationKind::Palette(from_json(&fields, &what)?),
        VariationTag::Audio => VariationKind::Audio(from_json(&fields, &what)?),
    };
    Ok(Variation::new(stored.duration, kind))
}

#[cfg(test)]
#[path = "../../tests/unit/schema/codec.rs"]
mod tests;
