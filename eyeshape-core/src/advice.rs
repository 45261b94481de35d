//! Expert-authored styling and eyewear advice keyed by eye shape.
//!
//! The table is static and read-only. Every label resolves to an entry:
//! labels outside the closed shape set map to [`AdviceKey::Default`].

use tracing::debug;

use crate::analyzer::EyeShape;

#[derive(Debug, PartialEq, Eq)]
pub struct AdviceEntry {
    pub makeup_tips: &'static [&'static str],
    pub eyewear_recommendations: &'static [&'static str],
}

/// Lookup key with an explicit fallback variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceKey {
    Shape(EyeShape),
    Default,
}

impl AdviceKey {
    pub fn for_label(label: &str) -> Self {
        match EyeShape::from_label(label) {
            Some(shape) => AdviceKey::Shape(shape),
            None => AdviceKey::Default,
        }
    }

    pub fn entry(self) -> &'static AdviceEntry {
        match self {
            AdviceKey::Shape(EyeShape::Almond) => &ALMOND,
            AdviceKey::Shape(EyeShape::Round) => &ROUND,
            AdviceKey::Shape(EyeShape::Monolid) => &MONOLID,
            AdviceKey::Shape(EyeShape::Hooded) => &HOODED,
            AdviceKey::Shape(EyeShape::Downturned) => &DOWNTURNED,
            AdviceKey::Shape(EyeShape::Upturned) => &UPTURNED,
            AdviceKey::Shape(EyeShape::WideSet) => &WIDE_SET,
            AdviceKey::Shape(EyeShape::CloseSet) => &CLOSE_SET,
            AdviceKey::Shape(EyeShape::DeepSet) => &DEEP_SET,
            AdviceKey::Default => &DEFAULT,
        }
    }
}

/// Advice for a shape label as returned by the model. Never fails.
pub fn resolve(shape_label: &str) -> &'static AdviceEntry {
    let key = AdviceKey::for_label(shape_label);
    if key == AdviceKey::Default {
        debug!("No advice entry for shape '{}', using default", shape_label);
    }
    key.entry()
}

pub static ALMOND: AdviceEntry = AdviceEntry {
    makeup_tips: &[
        "Almost any look works: experiment freely with winged liner and smoky shadow.",
        "Sweep a slightly darker shade into the outer V to emphasise the natural tapered shape.",
        "Keep liner thin at the inner corner and thicken it gradually toward the outer edge.",
        "Highlight the center of the lid to add dimension without changing the balance.",
    ],
    eyewear_recommendations: &["Oversized square", "Classic aviator", "Cat-eye"],
};

pub static ROUND: AdviceEntry = AdviceEntry {
    makeup_tips: &[
        "Extend liner horizontally past the outer corner to elongate the eye.",
        "Concentrate darker shadow on the outer third and blend outward, not upward.",
        "Tightline the upper waterline to define the eye without closing it off.",
        "Keep the inner corner and center lid light to avoid making the eye look rounder.",
    ],
    eyewear_recommendations: &["Rectangular", "Angular geometric", "Bold browline"],
};

pub static MONOLID: AdviceEntry = AdviceEntry {
    makeup_tips: &[
        "Build a gradient: darkest at the lash line, fading up toward the brow.",
        "Draw a thicker liner and check it with eyes open so it stays visible.",
        "Use a curling primer and tubing mascara to hold lift in straight lashes.",
        "Add shimmer to the center of the lid to create the illusion of depth.",
    ],
    eyewear_recommendations: &["Soft cat-eye", "Round wire-rim", "Semi-rimless"],
};

pub static HOODED: AdviceEntry = AdviceEntry {
    makeup_tips: &[
        "Place crease color slightly above the natural crease so it shows with eyes open.",
        "Apply primer to stop shadow from transferring onto the hood.",
        "Use a 'batwing' liner shape that skips the part of the lid hidden by the fold.",
        "Choose matte shades on the hood and save shimmer for the visible lid.",
    ],
    eyewear_recommendations: &["Upswept cat-eye", "Browline", "Clear or light-toned acetate"],
};

pub static DOWNTURNED: AdviceEntry = AdviceEntry {
    makeup_tips: &[
        "Angle liner upward at the outer corner to lift the eye.",
        "Keep lower-lash definition on the inner two thirds to avoid dragging the corner down.",
        "Focus mascara on the outer upper lashes for extra lift.",
    ],
    eyewear_recommendations: &["Cat-eye", "Upswept wayfarer", "Frames with a strong top line"],
};

pub static UPTURNED: AdviceEntry = AdviceEntry {
    makeup_tips: &[
        "Balance the lift with soft definition along the outer lower lash line.",
        "Follow the natural upward angle with liner instead of exaggerating it.",
        "Blend a touch of shadow under the outer corner to even out the shape.",
    ],
    eyewear_recommendations: &["Round", "Oval", "Soft rectangular"],
};

pub static WIDE_SET: AdviceEntry = AdviceEntry {
    makeup_tips: &[
        "Bring darker shadow and liner right into the inner corner to visually close the gap.",
        "Avoid highlighter in the inner corner.",
        "Fill the inner end of the brows so they start slightly closer together.",
    ],
    eyewear_recommendations: &["Dark, narrow bridge", "Keyhole bridge", "Bold full-rim"],
};

pub static CLOSE_SET: AdviceEntry = AdviceEntry {
    makeup_tips: &[
        "Brighten the inner corner with a light, luminous shade.",
        "Start liner at the middle of the lid and extend it outward.",
        "Concentrate mascara on the outer lashes to draw the eye outward.",
    ],
    eyewear_recommendations: &["Clear or thin bridge", "Wide rectangular", "Light-colored frames"],
};

pub static DEEP_SET: AdviceEntry = AdviceEntry {
    makeup_tips: &[
        "Use light, shimmering shades on the lid to bring the eye forward.",
        "Keep darker shadow just above the crease, not in it.",
        "Line only the outer half of the upper lash line to keep the eye open.",
        "Highlight under the brow bone sparingly to avoid deepening the set.",
    ],
    eyewear_recommendations: &["Low-bridge", "Thin metal", "Light-toned rims"],
};

pub static DEFAULT: AdviceEntry = AdviceEntry {
    makeup_tips: &[
        "Define the upper lash line with a thin liner and build from there.",
        "Use a neutral transition shade in the crease for soft dimension.",
        "Curl lashes and apply mascara to open up the eye.",
    ],
    eyewear_recommendations: &["Classic rectangular", "Soft round", "Thin metal frames"],
};
