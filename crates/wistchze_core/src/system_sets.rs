//! System sets use externally between crates

use bevy_ecs::prelude::SystemSet;

#[derive(SystemSet, Hash, Debug, Clone, Copy, Eq, PartialEq)]
/// Gameplay runs in four chained steps each frame.
///
/// Anything reacting to freshly spawned components belongs in [`GameplaySet::Setup`]. Systems
/// turning player or AI intent into commands run in [`GameplaySet::Input`], which is flushed
/// before [`GameplaySet::Simulate`] so markers inserted by commands are seen the same frame.
///
/// If wanting to use the results of this frame's interpolation (e.g. to place cameras), run in
/// [`GameplaySet::Completed`]
pub enum GameplaySet {
    Setup,
    Input,
    Simulate,
    Completed,
}
