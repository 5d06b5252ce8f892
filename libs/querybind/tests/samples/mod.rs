#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use querybind::Record;

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Sample1 {
    ignore: String,
    pub singleton: isize,
}

impl Sample1 {
    pub fn with_ignore(ignore: &str) -> Self {
        Self {
            ignore: ignore.to_string(),
            ..Default::default()
        }
    }

    pub fn ignore(&self) -> &str {
        &self.ignore
    }
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Sample2 {
    pub optional: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Sample3 {
    pub multiple: Vec<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Sample4 {
    pub fixed: [usize; 5],
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Sample5 {
    #[param(rename = "tagged")]
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Sample6 {
    pub name: String,
    pub origin: Point,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Sample7 {
    pub int: isize,
    pub int8: i8,
    pub int16: i16,
    pub int32: i32,
    pub int64: i64,
    pub uint: usize,
    pub uint8: u8,
    pub uint16: u16,
    pub uint32: u32,
    pub uint64: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Example1 {
    unexported_data: bool,
    pub message: String,
    #[param(rename = "weight")]
    pub weight_kg: Option<i32>,
    pub vec: [f64; 3],
    #[param(rename = "names")]
    pub name_list: Vec<String>,
}

impl Example1 {
    pub fn with_unexported_data(unexported_data: bool) -> Self {
        Self {
            unexported_data,
            ..Default::default()
        }
    }

    pub fn unexported_data(&self) -> bool {
        self.unexported_data
    }
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Tuple(pub u32, pub String);

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Unit;

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub enum Mode {
    #[default]
    Fast,
    Slow,
}

#[derive(Debug, Clone, Default, Record)]
pub struct WithMap {
    pub lookup: HashMap<String, u32>,
}

/// Closures have no `Debug`, so neither does this record.
#[derive(Clone, Record)]
pub struct WithCallback {
    pub callback: Arc<dyn Fn(u32) -> u32 + Send + Sync>,
}

#[derive(Debug, Clone, Record)]
pub struct WithFnPointer {
    pub hook: fn(),
}

#[derive(Debug, Clone, Record)]
pub struct WithTraitObject {
    pub inner: Arc<dyn std::fmt::Debug + Send + Sync>,
}

#[derive(Debug, Clone, Record)]
pub struct WithRawPointer {
    pub ptr: *const u8,
}

#[derive(Debug, Clone, Record)]
pub struct WithReference {
    pub name: &'static str,
}

#[derive(Debug, Clone, Default, Record)]
pub struct WithNestedShape {
    pub groups: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, Record)]
pub struct WithSequenceOfRecords {
    pub points: Vec<Point>,
}

/// Unsupported kinds are fine as long as the field is not exported.
#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct HiddenComplexity {
    cache: HashMap<String, Vec<Point>>,
    pub(crate) origin: Point,
    #[param(skip)]
    pub scratch: Vec<Point>,
    pub count: u16,
}

#[derive(Debug, Clone, Default, Record)]
pub struct Clashing {
    pub first: String,
    #[param(rename = "first")]
    pub second: String,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct RawIdent {
    pub r#type: String,
}
