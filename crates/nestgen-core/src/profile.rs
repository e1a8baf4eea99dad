use serde::Serialize;

use crate::config::TransportKind;

/// The class that exposes a resource over its transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryKind {
    Controller,
    Gateway,
    Resolver,
}

impl PrimaryKind {
    /// File name infix and class name suffix source: `users.controller.ts`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryKind::Controller => "controller",
            PrimaryKind::Gateway => "gateway",
            PrimaryKind::Resolver => "resolver",
        }
    }

    /// Class name suffix: `UsersController`.
    pub fn class_suffix(&self) -> &'static str {
        match self {
            PrimaryKind::Controller => "Controller",
            PrimaryKind::Gateway => "Gateway",
            PrimaryKind::Resolver => "Resolver",
        }
    }
}

/// How input shapes are named for a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSuffix {
    Dto,
    Input,
}

impl InputSuffix {
    /// File name infix: `create-user.dto.ts`.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputSuffix::Dto => "dto",
            InputSuffix::Input => "input",
        }
    }

    /// Class name suffix: `CreateUserDto`.
    pub fn class_suffix(&self) -> &'static str {
        match self {
            InputSuffix::Dto => "Dto",
            InputSuffix::Input => "Input",
        }
    }
}

/// File-level shape of a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub kind: TransportKind,
    pub primary: PrimaryKind,
    pub input_suffix: InputSuffix,
    /// Emits `<stem>.graphql` next to the resolver.
    pub schema_file: bool,
    /// Removal takes a dedicated input shape instead of a bare id.
    pub remove_input: bool,
}

pub const PROFILES: [Profile; 5] = [
    Profile {
        kind: TransportKind::Rest,
        primary: PrimaryKind::Controller,
        input_suffix: InputSuffix::Dto,
        schema_file: false,
        remove_input: false,
    },
    Profile {
        kind: TransportKind::Microservice,
        primary: PrimaryKind::Controller,
        input_suffix: InputSuffix::Dto,
        schema_file: false,
        remove_input: false,
    },
    Profile {
        kind: TransportKind::Ws,
        primary: PrimaryKind::Gateway,
        input_suffix: InputSuffix::Dto,
        schema_file: false,
        remove_input: false,
    },
    Profile {
        kind: TransportKind::GraphqlCodeFirst,
        primary: PrimaryKind::Resolver,
        input_suffix: InputSuffix::Input,
        schema_file: false,
        remove_input: true,
    },
    Profile {
        kind: TransportKind::GraphqlSchemaFirst,
        primary: PrimaryKind::Resolver,
        input_suffix: InputSuffix::Input,
        schema_file: true,
        remove_input: true,
    },
];

/// Look up the profile of a transport kind.
pub fn profile_for(kind: TransportKind) -> &'static Profile {
    // PROFILES is ordered like TransportKind::ALL
    &PROFILES[kind as usize]
}
