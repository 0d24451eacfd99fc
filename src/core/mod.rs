/// Core module for the toolbox utilities
///
/// This module contains the text analyzer, its counting rules and result
/// record, the password generator and the temperature converter.

pub mod analysis;
pub mod analyzer;
pub mod password;
pub mod temperature;
