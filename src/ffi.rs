//! C ABI over the JSON input documents.
//!
//! Each entry point takes a NUL-terminated UTF-8 [`NetworkInput`] document
//! and returns a newly allocated JSON string, either `{"ok": <result>}` or
//! `{"error": "<message>"}`. Returned strings must be released with
//! [`u_distribution_free_string`].

use std::ffi::{CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

use libc::c_char;
use serde::Serialize;
use serde_json::json;

use crate::error::Result;
use crate::input::NetworkInput;

/// Runs the `scenario` section of the document.
///
/// # Safety
///
/// `input` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn u_distribution_optimize_json(input: *const c_char) -> *mut c_char {
    run(input, |doc| doc.optimize())
}

/// Compares the `current` and `proposed` sections of the document.
///
/// # Safety
///
/// Same contract as [`u_distribution_optimize_json`].
#[no_mangle]
pub unsafe extern "C" fn u_distribution_compare_json(input: *const c_char) -> *mut c_char {
    run(input, |doc| doc.compare())
}

/// Releases a string returned by this library.
///
/// # Safety
///
/// `s` must be null or a pointer returned by one of the entry points above,
/// not already freed.
#[no_mangle]
pub unsafe extern "C" fn u_distribution_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

unsafe fn run<T, F>(input: *const c_char, f: F) -> *mut c_char
where
    T: Serialize,
    F: FnOnce(&NetworkInput) -> Result<T>,
{
    if input.is_null() {
        return into_c_string(json!({ "error": "null input" }).to_string());
    }
    let text = match CStr::from_ptr(input).to_str() {
        Ok(text) => text,
        Err(e) => return into_c_string(json!({ "error": e.to_string() }).to_string()),
    };

    let response = catch_unwind(AssertUnwindSafe(|| {
        NetworkInput::from_json(text)
            .and_then(|doc| f(&doc))
            .and_then(|value| Ok(serde_json::to_value(value)?))
    }));
    let body = match response {
        Ok(Ok(value)) => json!({ "ok": value }),
        Ok(Err(e)) => json!({ "error": e.to_string() }),
        Err(_) => json!({ "error": "internal panic" }),
    };
    into_c_string(body.to_string())
}

fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c) => c.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(
        f: unsafe extern "C" fn(*const c_char) -> *mut c_char,
        input: &str,
    ) -> serde_json::Value {
        let c_input = CString::new(input).expect("no NUL");
        unsafe {
            let out = f(c_input.as_ptr());
            assert!(!out.is_null());
            let text = CStr::from_ptr(out).to_str().expect("utf-8").to_owned();
            u_distribution_free_string(out);
            serde_json::from_str(&text).expect("json")
        }
    }

    #[test]
    fn test_error_envelope() {
        let value = call(u_distribution_optimize_json, "not json");
        assert!(value.get("error").is_some());
    }

    #[test]
    fn test_ok_envelope() {
        let doc = r#"{
            "pdvs": [
                {"latitude": 0.0, "longitude": 0.1, "demanda_kg": 100},
                {"latitude": 0.0, "longitude": 0.2, "demanda_kg": 100}
            ],
            "dc_sizes": [
                {"size": "small", "capacity_kg": 1000, "monthly_cost": 10},
                {"size": "medium", "capacity_kg": 2000, "monthly_cost": 20},
                {"size": "large", "capacity_kg": 3000, "monthly_cost": 30}
            ],
            "transport": [
                {"name": "Van", "fixed_cost": 100, "variable_cost_per_km": 1,
                 "deliveries_per_month": 20, "capacity_per_delivery_kg": 1000}
            ],
            "config": {"min_average_stops": 1.0},
            "scenario": {"dc_count": 1}
        }"#;
        let value = call(u_distribution_optimize_json, doc);
        let ok = value.get("ok").expect("ok envelope");
        assert_eq!(ok["vehicles"]["Van"], 1);
    }

    #[test]
    fn test_null_input() {
        unsafe {
            let out = u_distribution_compare_json(ptr::null());
            let text = CStr::from_ptr(out).to_str().expect("utf-8").to_owned();
            u_distribution_free_string(out);
            assert!(text.contains("error"));
        }
    }
}
