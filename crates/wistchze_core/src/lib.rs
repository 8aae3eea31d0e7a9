//! Core functionality shared by the gameplay plugins
//!
//! This includes the gameplay system sets, goal components, interpolation helpers, etc
//!
//! Almost every other crate will depend on this crate.

#![warn(clippy::unwrap_used)]
#![warn(clippy::perf, clippy::disallowed_types)] // performance warns
#![warn(clippy::pedantic)]
// most bevy systems violate these. Nothing I can do about it at the moment.
#![allow(
    clippy::type_complexity,
    clippy::too_many_arguments,
    clippy::needless_pass_by_value // TODO: separate out system functions from non-system
)]
#![allow(clippy::cast_possible_truncation)]

pub use thiserror;

#[cfg(feature = "developer-tools")]
pub use bevy_inspector_egui::{self, bevy_egui};

pub mod goals;
pub mod interp;
pub mod system_sets;

pub use system_sets::GameplaySet;

#[cfg(test)]
mod test;

/// set up core resources, systems, `system_sets`, etc
pub struct CorePlugin;

impl bevy_app::Plugin for CorePlugin {
    fn build(&self, app: &mut bevy_app::App) {
        #[allow(clippy::enum_glob_use)]
        use self::system_sets::GameplaySet::*;
        use bevy_app::prelude::*;
        use bevy_ecs::schedule::{apply_deferred, IntoSystemConfigs, IntoSystemSetConfigs};

        app.configure_sets(Update, (Setup, Input, Simulate, Completed).chain())
            // anything spawned or marked by input has to be visible to the simulation in the
            // same frame
            .add_systems(Update, apply_deferred.after(Input).before(Simulate))
            .add_systems(Startup, goals::register_types);
    }
}

/// A plugin that sets up things that nearly every system expects to exist, for quick test setup
pub mod test_utils {
    pub struct DefaultTestPlugin;

    use bevy_app::prelude::*;
    use bevy_core::Name;
    use bevy_ecs::prelude::*;
    use bevy_log::prelude::*;
    use bevy_transform::prelude::*;

    impl Plugin for DefaultTestPlugin {
        fn build(&self, app: &mut App) {
            // system to log location of every named entity when it moves
            app.add_systems(
                Last,
                |q: Query<
                    (&GlobalTransform, &Name),
                    Or<(Changed<GlobalTransform>, Added<GlobalTransform>)>,
                >| {
                    q.iter().for_each(|e| {
                        debug!("`{}` moved to {}", e.1.to_string(), e.0.translation());
                    });
                },
            );

            // almost every system assumes these plugins are present
            app.add_plugins(bevy_log::LogPlugin::default())
                .add_plugins(bevy_time::TimePlugin)
                .add_plugins(bevy_transform::TransformPlugin)
                .add_plugins(super::CorePlugin);
        }
    }
}
