//! Builds configurations from explicit merge layers.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::PullwrightConfig;

/// Source a layer is pushed as, from lowest to highest precedence.
#[derive(Clone, Copy, Debug)]
pub enum Layer {
    Defaults,
    File,
    Environment,
    Cli,
}

/// Merges `layers` in order and returns the resulting configuration.
pub fn merged(layers: Vec<(Layer, Value)>) -> PullwrightConfig {
    let mut composer = MergeComposer::new();
    for (layer, value) in layers {
        match layer {
            Layer::Defaults => composer.push_defaults(value),
            Layer::File => composer.push_file(value, None),
            Layer::Environment => composer.push_environment(value),
            Layer::Cli => composer.push_cli(value),
        }
    }

    PullwrightConfig::merge_from_layers(composer.layers()).expect("layers should merge")
}
