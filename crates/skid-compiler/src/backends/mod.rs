//! backends — Toolchains externes qui transforment le Go généré en binaire.

pub mod go_build;
