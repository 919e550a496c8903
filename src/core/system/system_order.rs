//! Central system ordering labels to make the per-frame sequence explicit.
//! Stages (all in `Update`, chained):
//! 1. FieldSignal (host activation, teardown requests, pointer + resize delivery)
//! 2. FieldFrame (one update of every running field)
//! 3. FieldPresent (display lists replayed as gizmos)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct FieldSignalSet; // external signals applied before the frame

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct FieldFrameSet; // update-and-draw

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct FieldPresentSet; // read-only replay of the frame just drawn
