//! Scene-level tests across the library, managers and systems
