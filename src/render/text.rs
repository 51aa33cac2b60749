use std::borrow::Cow;
use std::collections::HashMap;
use std::rc::Rc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ThreadlineError, ThreadlineResult};

const MAX_CACHED: usize = 4096;

/// Shaped single-line text plus the metrics needed to place it by baseline.
pub(crate) struct ShapedText {
    pub(crate) layout: parley::Layout<Rgba8>,
    pub(crate) width: f64,
    pub(crate) baseline: f64,
}

/// Parley shaping over one registered font.
///
/// The font is registered once; shaped labels are cached by `(text, size)` because nail labels
/// repeat identically on every frame.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family: String,
    cache: HashMap<(String, u32), Rc<ShapedText>>,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and prepare fresh Parley contexts.
    pub(crate) fn new(font_bytes: &[u8]) -> ThreadlineResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ThreadlineError::validation("no font families registered from font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ThreadlineError::validation("registered font family has no name"))?
            .to_string();
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            cache: HashMap::new(),
        })
    }

    /// Shape `text` at `size_px`. Color is applied at draw time, so the brush is left default.
    pub(crate) fn shape(
        &mut self,
        text: &str,
        size_px: f32,
    ) -> ThreadlineResult<Rc<ShapedText>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ThreadlineError::validation(
                "text size must be finite and > 0",
            ));
        }
        let key = (text.to_string(), size_px.to_bits());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(Rc::clone(hit));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(Rgba8::default()));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        let baseline = layout
            .lines()
            .next()
            .map(|l| f64::from(l.metrics().baseline))
            .unwrap_or(f64::from(size_px));
        let shaped = Rc::new(ShapedText {
            width: f64::from(layout.width()),
            baseline,
            layout,
        });
        if self.cache.len() >= MAX_CACHED {
            self.cache.clear();
        }
        self.cache.insert(key, Rc::clone(&shaped));
        Ok(shaped)
    }
}
