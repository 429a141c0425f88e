/// Text overlays, ink strokes and the mutation rules that keep them consistent.
pub mod overlay;
