/// Celsius / Fahrenheit conversion
///
/// Results are rounded to two decimal places.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A number followed by an optional unit, e.g. "36.6C" or "-40 f"
    static ref READING: Regex =
        Regex::new(r"^\s*([-+]?(?:\d+\.?\d*|\.\d+))\s*°?\s*([A-Za-z]+)\s*$").unwrap();
}

/// Errors raised while parsing temperature input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemperatureError {
    #[error("Invalid unit. Please enter 'C' or 'F'.")]
    InvalidUnit(String),

    #[error("Invalid input. Please enter a numeric temperature.")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// The unit a value in this unit converts to
    pub fn other(&self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = TemperatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(TemperatureError::InvalidUnit(s.to_string())),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// F = C × 9/5 + 32
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round2(celsius * 9.0 / 5.0 + 32.0)
}

/// C = (F − 32) × 5/9
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    round2((fahrenheit - 32.0) * 5.0 / 9.0)
}

/// A value converted from one unit to the other
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub value: f64,
    pub from: TemperatureUnit,
    pub result: f64,
    pub to: TemperatureUnit,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug keeps the decimal point on whole numbers: 212.0, not 212
        write!(f, "{:?}{} = {:?}{}", self.value, self.from, self.result, self.to)
    }
}

/// Convert `value` given in `from` into the other unit
pub fn convert(value: f64, from: TemperatureUnit) -> Conversion {
    let result = match from {
        TemperatureUnit::Celsius => celsius_to_fahrenheit(value),
        TemperatureUnit::Fahrenheit => fahrenheit_to_celsius(value),
    };
    Conversion { value, from, result, to: from.other() }
}

/// Parse a numeric temperature value
pub fn parse_value(input: &str) -> Result<f64, TemperatureError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| TemperatureError::InvalidValue(input.to_string()))
}

/// Parse a reading such as "36.6C", "98.6 f" or "-40°F"
pub fn parse_reading(input: &str) -> Result<(f64, TemperatureUnit), TemperatureError> {
    let caps = READING
        .captures(input)
        .ok_or_else(|| TemperatureError::InvalidValue(input.to_string()))?;
    let value = parse_value(&caps[1])?;
    let unit = caps[2].parse::<TemperatureUnit>()?;
    Ok((value, unit))
}
