//! Cell and dtype formatting for table display.
//!
//! Provides safe formatting of Arrow array values to display strings and
//! the short dtype tags shown in dtype listings.

use arrow::array::{
    Array, BooleanArray, Date32Array, Date64Array, DictionaryArray, Float32Array, Float64Array,
    Int16Array, Int32Array, Int64Array, Int8Array, LargeStringArray, StringArray,
    TimestampMicrosecondArray, TimestampMillisecondArray, TimestampNanosecondArray,
    TimestampSecondArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::{DataType, Int32Type};

/// Short dtype tag for a column or index, as shown in dtype listings.
#[must_use]
pub fn dtype_name(dt: &DataType) -> &'static str {
    match dt {
        DataType::Null => "null",
        DataType::Boolean => "bool",
        DataType::Int8 => "i8",
        DataType::Int16 => "i16",
        DataType::Int32 => "i32",
        DataType::Int64 => "i64",
        DataType::UInt8 => "u8",
        DataType::UInt16 => "u16",
        DataType::UInt32 => "u32",
        DataType::UInt64 => "u64",
        DataType::Float32 => "f32",
        DataType::Float64 => "f64",
        DataType::Utf8 => "string",
        DataType::LargeUtf8 => "large_string",
        DataType::Binary => "binary",
        DataType::LargeBinary => "large_binary",
        DataType::Date32 => "date32",
        DataType::Date64 => "date64",
        DataType::Timestamp(_, _) => "timestamp",
        DataType::List(_) => "list",
        DataType::LargeList(_) => "large_list",
        DataType::Struct(_) => "struct",
        DataType::Map(_, _) => "map",
        DataType::Dictionary(_, _) => "category",
        _ => "unknown",
    }
}

/// Format the cell of `array` at `row` as display text.
///
/// Null cells render as `NULL`. Dictionary-encoded cells resolve to their
/// category string. Unsupported types render a `<tag>` placeholder. An
/// out-of-bounds `row` yields the empty string.
#[must_use]
pub fn format_cell(array: &dyn Array, row: usize) -> String {
    if row >= array.len() {
        return String::new();
    }
    if array.is_null(row) {
        return "NULL".to_string();
    }

    let formatted = match array.data_type() {
        DataType::Utf8 => format_utf8(array, row),
        DataType::LargeUtf8 => format_large_utf8(array, row),
        DataType::Boolean => format_boolean(array, row),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => format_integer(array, row),
        DataType::Float32 => format_float32(array, row),
        DataType::Float64 => format_float64(array, row),
        DataType::Dictionary(_, _) => format_dictionary(array, row),
        DataType::Date32 => format_date32(array, row),
        DataType::Date64 => format_date64(array, row),
        DataType::Timestamp(unit, _) => format_timestamp(array, row, *unit),
        DataType::Null => Some("NULL".to_string()),
        other => Some(format!("<{}>", dtype_name(other))),
    };

    formatted.unwrap_or_else(|| format!("<{}>", dtype_name(array.data_type())))
}

fn format_utf8(array: &dyn Array, row: usize) -> Option<String> {
    array
        .as_any()
        .downcast_ref::<StringArray>()
        .map(|arr| arr.value(row).to_string())
}

fn format_large_utf8(array: &dyn Array, row: usize) -> Option<String> {
    array
        .as_any()
        .downcast_ref::<LargeStringArray>()
        .map(|arr| arr.value(row).to_string())
}

fn format_boolean(array: &dyn Array, row: usize) -> Option<String> {
    array
        .as_any()
        .downcast_ref::<BooleanArray>()
        .map(|arr| if arr.value(row) { "true" } else { "false" }.to_string())
}

fn format_integer(array: &dyn Array, row: usize) -> Option<String> {
    let any = array.as_any();
    match array.data_type() {
        DataType::Int8 => any.downcast_ref::<Int8Array>().map(|a| a.value(row).to_string()),
        DataType::Int16 => any
            .downcast_ref::<Int16Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row).to_string()),
        DataType::UInt8 => any
            .downcast_ref::<UInt8Array>()
            .map(|a| a.value(row).to_string()),
        DataType::UInt16 => any
            .downcast_ref::<UInt16Array>()
            .map(|a| a.value(row).to_string()),
        DataType::UInt32 => any
            .downcast_ref::<UInt32Array>()
            .map(|a| a.value(row).to_string()),
        DataType::UInt64 => any
            .downcast_ref::<UInt64Array>()
            .map(|a| a.value(row).to_string()),
        _ => None,
    }
}

fn format_float32(array: &dyn Array, row: usize) -> Option<String> {
    array
        .as_any()
        .downcast_ref::<Float32Array>()
        .map(|arr| arr.value(row).to_string())
}

fn format_float64(array: &dyn Array, row: usize) -> Option<String> {
    array
        .as_any()
        .downcast_ref::<Float64Array>()
        .map(|arr| arr.value(row).to_string())
}

fn format_dictionary(array: &dyn Array, row: usize) -> Option<String> {
    let arr = array.as_any().downcast_ref::<DictionaryArray<Int32Type>>()?;
    let key = usize::try_from(arr.keys().value(row)).ok()?;
    let values = arr.values().as_any().downcast_ref::<StringArray>()?;
    if key < values.len() {
        Some(values.value(key).to_string())
    } else {
        None
    }
}

fn format_date32(array: &dyn Array, row: usize) -> Option<String> {
    array.as_any().downcast_ref::<Date32Array>().map(|arr| {
        let days = arr.value(row);
        format!("date:{days}")
    })
}

fn format_date64(array: &dyn Array, row: usize) -> Option<String> {
    array.as_any().downcast_ref::<Date64Array>().map(|arr| {
        let millis = arr.value(row);
        format!("date64:{millis}")
    })
}

fn format_timestamp(
    array: &dyn Array,
    row: usize,
    unit: arrow::datatypes::TimeUnit,
) -> Option<String> {
    use arrow::datatypes::TimeUnit;

    match unit {
        TimeUnit::Second => array
            .as_any()
            .downcast_ref::<TimestampSecondArray>()
            .map(|arr| format!("ts:{}", arr.value(row))),
        TimeUnit::Millisecond => array
            .as_any()
            .downcast_ref::<TimestampMillisecondArray>()
            .map(|arr| format!("ts:{}", arr.value(row))),
        TimeUnit::Microsecond => array
            .as_any()
            .downcast_ref::<TimestampMicrosecondArray>()
            .map(|arr| format!("ts:{}", arr.value(row))),
        TimeUnit::Nanosecond => array
            .as_any()
            .downcast_ref::<TimestampNanosecondArray>()
            .map(|arr| format!("ts:{}", arr.value(row))),
    }
}

/// Cap cell text at `max_width` characters, appending `...` when cut.
///
/// Counts characters, not bytes, so multi-byte text never splits mid-char.
#[must_use]
pub fn truncate_cell(s: &str, max_width: usize) -> String {
    if max_width < 3 {
        return s.chars().take(max_width).collect();
    }

    let char_count = s.chars().count();
    if char_count <= max_width {
        return s.to_string();
    }

    let truncate_at = max_width.saturating_sub(3);
    let mut result: String = s.chars().take(truncate_at).collect();
    result.push_str("...");
    result
}
