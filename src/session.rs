use crate::{models::SolveRequest, payload::ImagePayload};

/// A single optional value owned by the presentation layer.
#[derive(Debug, Clone)]
pub struct CaptureSlot<T> {
    value: Option<T>,
}

impl<T> Default for CaptureSlot<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> CaptureSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was there.
    pub fn store(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }
}

/// Image inputs for one page: a captured frame and an uploaded file.
#[derive(Debug, Clone, Default)]
pub struct SolveSession {
    camera: CaptureSlot<ImagePayload>,
    upload: CaptureSlot<ImagePayload>,
}

impl SolveSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(&mut self, image: ImagePayload) {
        self.camera.store(image);
    }

    /// Drops the captured frame so the camera is shown again.
    pub fn retake(&mut self) {
        self.camera.clear();
    }

    pub fn has_capture(&self) -> bool {
        self.camera.is_filled()
    }

    pub fn upload(&mut self, image: ImagePayload) {
        self.upload.store(image);
    }

    pub fn clear_upload(&mut self) {
        self.upload.clear();
    }

    /// The upload wins over a captured frame when both are present.
    pub fn active_image(&self) -> Option<&ImagePayload> {
        self.upload.get().or_else(|| self.camera.get())
    }

    pub fn prepare(&self, prompt: impl Into<String>) -> SolveRequest {
        SolveRequest {
            prompt: prompt.into(),
            image: self.active_image().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{tests::red_square_png, ImageSource};

    #[test]
    fn test_slot_store_and_clear() {
        let mut slot = CaptureSlot::new();
        assert!(!slot.is_filled());
        slot.store(1);
        slot.store(2);
        assert_eq!(slot.get(), Some(&2));
        assert_eq!(slot.take(), Some(2));
        assert!(!slot.is_filled());
    }

    #[test]
    fn test_upload_takes_precedence_over_capture() {
        let png = red_square_png(6);
        let mut session = SolveSession::new();
        session.capture(ImagePayload::from_capture(&png).unwrap());
        assert_eq!(
            session.active_image().map(|i| i.source()),
            Some(ImageSource::Camera)
        );

        session.upload(ImagePayload::from_upload("p.png", &png).unwrap());
        assert_eq!(
            session.active_image().map(|i| i.source()),
            Some(ImageSource::Upload)
        );

        session.clear_upload();
        assert_eq!(
            session.active_image().map(|i| i.source()),
            Some(ImageSource::Camera)
        );
    }

    #[test]
    fn test_retake_empties_camera() {
        let mut session = SolveSession::new();
        session.capture(ImagePayload::from_capture(&red_square_png(4)).unwrap());
        session.retake();
        assert!(!session.has_capture());

        let request = session.prepare("what is this?");
        assert!(request.image.is_none());
        assert_eq!(request.prompt, "what is this?");
    }
}
