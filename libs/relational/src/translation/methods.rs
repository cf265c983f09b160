//! Host methods known to every provider.
use super::MethodInfo;
use crate::ast::ValueType;

pub static STRING_TO_UPPER: MethodInfo = MethodInfo {
    declaring_type: "String",
    name: "ToUpper",
    parameters: &[],
    return_type: ValueType::String,
    is_static: false,
};

pub static STRING_TO_LOWER: MethodInfo = MethodInfo {
    declaring_type: "String",
    name: "ToLower",
    parameters: &[],
    return_type: ValueType::String,
    is_static: false,
};

pub static STRING_TRIM: MethodInfo = MethodInfo {
    declaring_type: "String",
    name: "Trim",
    parameters: &[],
    return_type: ValueType::String,
    is_static: false,
};

/// `Substring(startIndex, length)`, zero-based.
pub static STRING_SUBSTRING: MethodInfo = MethodInfo {
    declaring_type: "String",
    name: "Substring",
    parameters: &[ValueType::Int32, ValueType::Int32],
    return_type: ValueType::String,
    is_static: false,
};

pub static MATH_ABS_INT64: MethodInfo = MethodInfo {
    declaring_type: "Math",
    name: "Abs",
    parameters: &[ValueType::Int64],
    return_type: ValueType::Int64,
    is_static: true,
};

pub static MATH_ABS_DOUBLE: MethodInfo = MethodInfo {
    declaring_type: "Math",
    name: "Abs",
    parameters: &[ValueType::Double],
    return_type: ValueType::Double,
    is_static: true,
};

pub static MATH_MAX_INT64: MethodInfo = MethodInfo {
    declaring_type: "Math",
    name: "Max",
    parameters: &[ValueType::Int64, ValueType::Int64],
    return_type: ValueType::Int64,
    is_static: true,
};

pub static MATH_MIN_INT64: MethodInfo = MethodInfo {
    declaring_type: "Math",
    name: "Min",
    parameters: &[ValueType::Int64, ValueType::Int64],
    return_type: ValueType::Int64,
    is_static: true,
};

pub static MATH_ROUND_DOUBLE: MethodInfo = MethodInfo {
    declaring_type: "Math",
    name: "Round",
    parameters: &[ValueType::Double],
    return_type: ValueType::Double,
    is_static: true,
};

pub(crate) static ALL: &[&MethodInfo] = &[
    &STRING_TO_UPPER,
    &STRING_TO_LOWER,
    &STRING_TRIM,
    &STRING_SUBSTRING,
    &MATH_ABS_INT64,
    &MATH_ABS_DOUBLE,
    &MATH_MAX_INT64,
    &MATH_MIN_INT64,
    &MATH_ROUND_DOUBLE,
];
