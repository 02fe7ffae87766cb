use std::sync::Arc;

use crate::{
    assets::media::AudioSourceInfo,
    foundation::error::{SlidecastError, SlidecastResult},
    slide::model::{MAX_SLIDES, Slide},
};

/// Step of the custom-clip wizard a session is currently on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WizardStep {
    /// Choosing the optional background audio track.
    #[default]
    AudioSetup,
    /// Authoring and arranging slides.
    SlideEdit,
    /// Ready to render.
    Render,
}

/// Caller-owned state of one custom-clip authoring session.
///
/// This is a plain value object passed into and returned from core calls;
/// there is no implicit page-level or global session state. A render request
/// takes an immutable snapshot of [`WizardSession::slides`].
#[derive(Clone, Debug, Default)]
pub struct WizardSession {
    /// Current wizard step.
    pub step: WizardStep,
    /// Ordered slides authored so far.
    pub slides: Vec<Arc<Slide>>,
    /// Slide currently being edited, if any.
    pub edit_index: Option<usize>,
    /// Probed audio track, if one was chosen.
    pub audio: Option<AudioSourceInfo>,
}

impl WizardSession {
    /// Start a fresh session at the audio-setup step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slide. Fails when the slide is invalid or the session is
    /// full.
    pub fn add_slide(&mut self, slide: Slide) -> SlidecastResult<()> {
        slide.validate()?;
        if self.slides.len() >= MAX_SLIDES {
            return Err(SlidecastError::validation(format!(
                "session holds the maximum of {MAX_SLIDES} slides"
            )));
        }
        self.slides.push(Arc::new(slide));
        Ok(())
    }

    /// Replace the slide at `index`.
    pub fn replace_slide(&mut self, index: usize, slide: Slide) -> SlidecastResult<()> {
        slide.validate()?;
        let slot = self.slides.get_mut(index).ok_or_else(|| {
            SlidecastError::validation(format!("no slide at index {index}"))
        })?;
        *slot = Arc::new(slide);
        Ok(())
    }

    /// Remove and return the slide at `index`, ending any edit.
    pub fn remove_slide(&mut self, index: usize) -> SlidecastResult<Arc<Slide>> {
        if index >= self.slides.len() {
            return Err(SlidecastError::validation(format!(
                "no slide at index {index}"
            )));
        }
        self.edit_index = None;
        Ok(self.slides.remove(index))
    }

    /// Begin editing the slide at `index`.
    pub fn begin_edit(&mut self, index: usize) -> SlidecastResult<&Slide> {
        let slide = self.slides.get(index).ok_or_else(|| {
            SlidecastError::validation(format!("no slide at index {index}"))
        })?;
        self.edit_index = Some(index);
        Ok(slide)
    }

    /// End editing without touching the slide list.
    pub fn end_edit(&mut self) {
        self.edit_index = None;
    }

    /// Advance to the next wizard step. Moving to the render step requires
    /// at least one slide.
    pub fn advance(&mut self) -> SlidecastResult<()> {
        self.step = match self.step {
            WizardStep::AudioSetup => WizardStep::SlideEdit,
            WizardStep::SlideEdit => {
                if self.slides.is_empty() {
                    return Err(SlidecastError::validation(
                        "cannot advance to render with no slides",
                    ));
                }
                WizardStep::Render
            }
            WizardStep::Render => WizardStep::Render,
        };
        if self.step != WizardStep::SlideEdit {
            self.edit_index = None;
        }
        Ok(())
    }

    /// Return to the previous wizard step.
    pub fn back(&mut self) {
        self.step = match self.step {
            WizardStep::AudioSetup => WizardStep::AudioSetup,
            WizardStep::SlideEdit => WizardStep::AudioSetup,
            WizardStep::Render => WizardStep::SlideEdit,
        };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slide/session.rs"]
mod tests;
