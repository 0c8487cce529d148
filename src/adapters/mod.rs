// Adapters layer: concrete record shapes that expose named attributes to the engine.

pub mod record;
