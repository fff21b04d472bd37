//! Deterministic fallback copywriter.
//!
//! When the external text-generation call fails or returns fewer than six
//! valid variants, the pipeline falls back to this local synthesizer. It is
//! a pure function of its inputs and always satisfies the [`StoryLines`]
//! length invariants, which is what makes `generate_variants` infallible.

use crate::lines::{
    self, StoryLines, MAX_BULLET, MAX_CTA, MAX_DEADLINE_LINE, MAX_FOOTNOTE, MAX_HEADLINE,
    MAX_PRICE_LINE, MAX_SUBHEADLINE,
};

/// Offer context carried from the generation request into copy synthesis.
#[derive(Debug, Clone)]
pub struct CopyContext {
    pub offer_text: String,
    pub room_label: String,
    pub complex_name: String,
    pub developer_name: String,
}

/// Synthesize six story variants from fixed boilerplate.
///
/// Same context always yields the same output. Every field is truncated to
/// its limit before construction, so the result needs no re-validation.
pub fn fallback_variants(ctx: &CopyContext) -> [StoryLines; 6] {
    let base = format!(
        "{} ({}, {})",
        ctx.offer_text.trim(),
        ctx.room_label,
        ctx.complex_name
    );

    std::array::from_fn(|idx| StoryLines {
        headline: lines::truncate_chars(&format!("Variant {}: {base}", idx + 1), MAX_HEADLINE),
        subheadline: lines::truncate_chars(
            &format!("Complex {} by {}", ctx.complex_name, ctx.developer_name),
            MAX_SUBHEADLINE,
        ),
        bullets: [
            lines::truncate_chars(&format!("Offer: {}", ctx.offer_text), MAX_BULLET),
            lines::truncate_chars(&format!("Room type: {}", ctx.room_label), MAX_BULLET),
            lines::truncate_chars("Choose your best purchase terms", MAX_BULLET),
        ],
        cta: lines::truncate_chars("Leave a request today", MAX_CTA),
        footnote: lines::truncate_chars("Contact manager for full details", MAX_FOOTNOTE),
        price_line: lines::truncate_chars("Price: on request", MAX_PRICE_LINE),
        deadline_line: lines::truncate_chars("Terms: valid now", MAX_DEADLINE_LINE),
    })
}
