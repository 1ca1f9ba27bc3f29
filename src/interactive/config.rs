use crate::{
    foundation::{
        core::Rgba8,
        error::{ScrollstageError, ScrollstageResult},
    },
    stage::content::ContentComponent,
};

/// How scroll position drives the timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Scrub {
    /// `true` jumps straight to the scroll position, `false` disables scroll linking.
    Enabled(bool),
    /// Seconds the playhead takes to catch up with the scroll position.
    Smoothed(f64),
}

impl Default for Scrub {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

/// User-tunable knobs. Keys are camelCase; missing keys take the defaults below and unknown keys
/// are ignored.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InteractiveConfig {
    /// When `false` setup runs but no master timeline is built.
    pub enabled: bool,

    pub scroll_length: f64,
    pub scrub_factor: Scrub,

    pub snap_scroll: bool,
    pub snap_delay: f64,
    pub snap_duration_min: f64,
    pub snap_duration_max: f64,

    pub image_scale_from: f64,
    pub image_scale_max: f64,
    pub image_scale_to: f64,

    pub rainbow_image_opacity_min: f64,
    pub rainbow_image_opacity_max: f64,
    pub rainbow_image_opacity_to: f64,

    pub shape_stroke_width: f64,

    pub shape_to_count: f64,

    pub shape_to_x_min: f64,
    pub shape_to_x_max: f64,
    pub shape_to_y_min: f64,
    pub shape_to_y_max: f64,

    pub shape_scale_to_min: f64,
    pub shape_scale_to_max: f64,
    pub focal_point_scale_to_max: f64,

    pub shape_rotate_from_min: f64,
    pub shape_rotate_from_max: f64,
    pub shape_rotate_to_min: f64,
    pub shape_rotate_to_max: f64,

    pub shape_expand_stagger: f64,
    pub shape_snap_stagger: f64,

    pub stage_in_duration: f64,
    pub stage_out_delay: f64,
    pub stage_out_duration: f64,

    pub text_component_stagger: f64,
    pub text_component_child_stagger: f64,
    pub letters_duration: f64,
    pub letters_stagger: f64,
    #[serde(alias = "headingLettersStagger")]
    pub header_letters_stagger: f64,
    pub body_letters_stagger: f64,
    pub scroll_prompt_letters_stagger: f64,
}

impl Default for InteractiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,

            scroll_length: 9.0,
            scrub_factor: Scrub::Enabled(true),

            snap_scroll: false,
            snap_delay: 0.2,
            snap_duration_min: 0.05,
            snap_duration_max: 1.25,

            image_scale_from: 1.075,
            image_scale_max: 1.035,
            image_scale_to: 1.035,

            rainbow_image_opacity_min: 0.35,
            rainbow_image_opacity_max: 0.4,
            rainbow_image_opacity_to: 1.0,

            shape_stroke_width: 2.0,

            shape_to_count: 0.5,

            shape_to_x_min: 0.05,
            shape_to_x_max: 0.75,
            shape_to_y_min: 0.05,
            shape_to_y_max: 0.666,

            shape_scale_to_min: 0.75,
            shape_scale_to_max: 0.833,
            focal_point_scale_to_max: 1.5,

            shape_rotate_from_min: 0.0,
            shape_rotate_from_max: 30.0,
            shape_rotate_to_min: 5.0,
            shape_rotate_to_max: 70.0,

            shape_expand_stagger: 0.125,
            shape_snap_stagger: 0.05,

            stage_in_duration: 0.25,
            stage_out_delay: 3.0,
            stage_out_duration: 0.25,

            text_component_stagger: 0.25,
            text_component_child_stagger: 0.15,
            letters_duration: 0.5,
            letters_stagger: 0.06,
            header_letters_stagger: 0.06,
            body_letters_stagger: 0.0055,
            scroll_prompt_letters_stagger: 0.0055,
        }
    }
}

impl InteractiveConfig {
    /// Merge a JSON object of overrides over the defaults.
    pub fn from_json_str(s: &str) -> ScrollstageResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Same as [`InteractiveConfig::from_json_str`] for an already parsed value.
    pub fn from_json_value(v: serde_json::Value) -> ScrollstageResult<Self> {
        let cfg: Self = serde_json::from_value(v)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Letter stagger for a component, falling back to `lettersStagger` when the component has no
    /// key of its own or its key is zero.
    pub fn letters_stagger_for(&self, component: ContentComponent) -> f64 {
        let own = match component {
            ContentComponent::Header => self.header_letters_stagger,
            ContentComponent::Body => self.body_letters_stagger,
            ContentComponent::ScrollPrompt => self.scroll_prompt_letters_stagger,
            ContentComponent::Progress => 0.0,
        };
        if own != 0.0 {
            own
        } else {
            self.letters_stagger
        }
    }

    /// Reject values the choreography cannot use.
    pub fn validate(&self) -> ScrollstageResult<()> {
        let non_negative = [
            ("snapDelay", self.snap_delay),
            ("snapDurationMin", self.snap_duration_min),
            ("snapDurationMax", self.snap_duration_max),
            ("shapeStrokeWidth", self.shape_stroke_width),
            ("shapeExpandStagger", self.shape_expand_stagger),
            ("shapeSnapStagger", self.shape_snap_stagger),
            ("stageInDuration", self.stage_in_duration),
            ("stageOutDelay", self.stage_out_delay),
            ("stageOutDuration", self.stage_out_duration),
            ("textComponentStagger", self.text_component_stagger),
            ("textComponentChildStagger", self.text_component_child_stagger),
            ("lettersDuration", self.letters_duration),
            ("lettersStagger", self.letters_stagger),
            ("headerLettersStagger", self.header_letters_stagger),
            ("bodyLettersStagger", self.body_letters_stagger),
            ("scrollPromptLettersStagger", self.scroll_prompt_letters_stagger),
        ];
        for (key, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(ScrollstageError::validation(format!(
                    "{key} must be finite and >= 0, got {v}"
                )));
            }
        }

        let finite = [
            ("imageScaleFrom", self.image_scale_from),
            ("imageScaleMax", self.image_scale_max),
            ("imageScaleTo", self.image_scale_to),
            ("rainbowImageOpacityMin", self.rainbow_image_opacity_min),
            ("rainbowImageOpacityMax", self.rainbow_image_opacity_max),
            ("rainbowImageOpacityTo", self.rainbow_image_opacity_to),
            ("shapeToXMin", self.shape_to_x_min),
            ("shapeToXMax", self.shape_to_x_max),
            ("shapeToYMin", self.shape_to_y_min),
            ("shapeToYMax", self.shape_to_y_max),
            ("shapeScaleToMin", self.shape_scale_to_min),
            ("shapeScaleToMax", self.shape_scale_to_max),
            ("focalPointScaleToMax", self.focal_point_scale_to_max),
            ("shapeRotateFromMin", self.shape_rotate_from_min),
            ("shapeRotateFromMax", self.shape_rotate_from_max),
            ("shapeRotateToMin", self.shape_rotate_to_min),
            ("shapeRotateToMax", self.shape_rotate_to_max),
        ];
        if let Some((key, v)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ScrollstageError::validation(format!(
                "{key} must be finite, got {v}"
            )));
        }

        if !self.scroll_length.is_finite() || self.scroll_length <= 0.0 {
            return Err(ScrollstageError::validation(format!(
                "scrollLength must be finite and > 0, got {}",
                self.scroll_length
            )));
        }
        if let Scrub::Smoothed(secs) = self.scrub_factor
            && (!secs.is_finite() || secs < 0.0)
        {
            return Err(ScrollstageError::validation(format!(
                "scrubFactor must be a boolean or a finite number >= 0, got {secs}"
            )));
        }
        if !(0.0..=1.0).contains(&self.shape_to_count) {
            return Err(ScrollstageError::validation(format!(
                "shapeToCount must be within [0, 1], got {}",
                self.shape_to_count
            )));
        }

        let ranges = [
            ("snapDuration", self.snap_duration_min, self.snap_duration_max),
            ("shapeToX", self.shape_to_x_min, self.shape_to_x_max),
            ("shapeToY", self.shape_to_y_min, self.shape_to_y_max),
            ("shapeScaleTo", self.shape_scale_to_min, self.shape_scale_to_max),
            (
                "shapeRotateFrom",
                self.shape_rotate_from_min,
                self.shape_rotate_from_max,
            ),
            (
                "shapeRotateTo",
                self.shape_rotate_to_min,
                self.shape_rotate_to_max,
            ),
            (
                "rainbowImageOpacity",
                self.rainbow_image_opacity_min,
                self.rainbow_image_opacity_max,
            ),
        ];
        for (key, min, max) in ranges {
            if min > max {
                return Err(ScrollstageError::validation(format!(
                    "{key}Min ({min}) must be <= {key}Max ({max})"
                )));
            }
        }
        Ok(())
    }
}

/// Colors the interactive draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Shape outlines.
    pub white: Rgba8,
    /// Last gradient stop.
    pub sea_crystal: Rgba8,
    /// Middle gradient stop.
    pub aurora_purple: Rgba8,
    /// First gradient stop.
    pub hot_coral: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            white: Rgba8::opaque(0xff, 0xff, 0xff),
            sea_crystal: Rgba8::opaque(0x60, 0xfc, 0xde),
            aurora_purple: Rgba8::opaque(0xa2, 0x59, 0xff),
            hot_coral: Rgba8::opaque(0xf2, 0x33, 0x6a),
        }
    }
}

impl Palette {
    /// Gradient stops as `(offset, color)` before any animation.
    pub fn rainbow_stops(&self) -> [(f64, Rgba8); 3] {
        [
            (0.666, self.hot_coral),
            (0.833, self.aurora_purple),
            (1.0, self.sea_crystal),
        ]
    }
}

/// Knobs that are part of the design rather than user configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct InternalConfig {
    /// Number of stages.
    pub stage_count: usize,
    /// Index of the shape that expands on its own.
    pub focal_point_shape_index: usize,
    /// Draw colors.
    pub palette: Palette,
    /// Components copied per stage, in content order.
    pub dynamic_components: [ContentComponent; 2],
}

impl Default for InternalConfig {
    fn default() -> Self {
        Self {
            stage_count: 5,
            focal_point_shape_index: 18,
            palette: Palette::default(),
            dynamic_components: [ContentComponent::Header, ContentComponent::Body],
        }
    }
}

/// Smooth-scroll wrapper settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmoothScrollConfig {
    /// Seconds the rendered scroll lags behind the requested scroll.
    pub smoothness: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self { smoothness: 0.75 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interactive/config.rs"]
mod tests;
