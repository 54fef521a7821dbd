//! Promise rejection mapping and floating-promise detection.

use crate::diagnostics::diagnostic_codes;
use crate::test_utils::{check, codes, effect_of_function};

const REJECTS_TYPE_ERROR: &str = "async function h() { throw new TypeError(\"t\"); }\n";

fn rejection(types: &str) -> (u32, String) {
    (
        diagnostic_codes::UNHANDLED_PROMISE_REJECTION_TYPE,
        format!("Unhandled promise rejection type: {types}."),
    )
}

#[test]
fn test_then_preserves_receiver_rejection() {
    let source = format!("{REJECTS_TYPE_ERROR}h().then(() => 1);");
    assert_eq!(check(&source), vec![rejection("TypeError")]);
}

#[test]
fn test_then_with_rejection_handler_handles_it() {
    let source = format!("{REJECTS_TYPE_ERROR}h().then(() => 1, () => 2);");
    assert!(check(&source).is_empty());
}

#[test]
fn test_then_with_undefined_rejection_handler_preserves() {
    let source = format!("{REJECTS_TYPE_ERROR}h().then(() => 1, undefined);");
    assert_eq!(check(&source), vec![rejection("TypeError")]);
}

#[test]
fn test_finally_preserves_receiver_rejection() {
    let source = format!("{REJECTS_TYPE_ERROR}h().finally(() => {{}});");
    assert_eq!(check(&source), vec![rejection("TypeError")]);
}

#[test]
fn test_catch_handler_that_throws_rejects_again() {
    let source = format!("{REJECTS_TYPE_ERROR}h().catch(() => {{ throw new RangeError(\"r\"); }});");
    assert_eq!(check(&source), vec![rejection("RangeError")]);
}

#[test]
fn test_promise_all_unions_element_rejections() {
    let source = "async function a() { throw new TypeError(\"a\"); }\n\
                  async function b() { throw new RangeError(\"b\"); }\n\
                  Promise.all([a(), b()]);";
    assert_eq!(check(source), vec![rejection("TypeError | RangeError")]);
}

#[test]
fn test_promise_reject_uses_reason_type() {
    assert_eq!(
        check("Promise.reject(new RangeError(\"x\"));"),
        vec![rejection("RangeError")]
    );
}

#[test]
fn test_await_turns_rejection_into_throw() {
    let source = format!("{REJECTS_TYPE_ERROR}async function g() {{ await h(); }}\nfunction s() {{ return h(); }}");
    assert_eq!(effect_of_function(&source, "g"), ("never".to_string(), "TypeError".to_string()));
    // A plain function returning the promise passes the rejection through.
    assert_eq!(effect_of_function(&source, "s"), ("never".to_string(), "TypeError".to_string()));
}

#[test]
fn test_await_inside_try_is_absorbed() {
    let source = format!("{REJECTS_TYPE_ERROR}async function g() {{ try {{ await h(); }} catch (e) {{ }} }}");
    assert_eq!(effect_of_function(&source, "g").1, "never");
}

#[test]
fn test_returned_promise_adds_to_async_rejection() {
    let source = format!(
        "{REJECTS_TYPE_ERROR}async function g(x: boolean) {{ if (x) {{ throw new RangeError(\"r\"); }} return h(); }}"
    );
    assert_eq!(effect_of_function(&source, "g").1, "RangeError | TypeError");
}

#[test]
fn test_awaiting_const_promise_carries_rejection() {
    let source =
        format!("{REJECTS_TYPE_ERROR}async function g() {{ const p = h(); await p; }}");
    assert_eq!(effect_of_function(&source, "g").1, "TypeError");
}

#[test]
fn test_top_level_await_reports_rejection_at_await() {
    let source = format!("{REJECTS_TYPE_ERROR}await h();");
    assert_eq!(check(&source), vec![rejection("TypeError")]);
}

#[test]
fn test_top_level_await_in_try_is_handled() {
    let source = format!("{REJECTS_TYPE_ERROR}try {{ await h(); }} catch (e) {{ }}");
    assert!(check(&source).is_empty());
}

#[test]
fn test_floating_promise_inside_function_body_is_flagged() {
    let source = format!("{REJECTS_TYPE_ERROR}async function g() {{ h(); }}");
    assert_eq!(codes(&source), vec![diagnostic_codes::UNHANDLED_PROMISE_REJECTION_TYPE]);
}

#[test]
fn test_floating_promise_inside_try_is_still_flagged() {
    let source = format!("{REJECTS_TYPE_ERROR}try {{ h(); }} catch (e) {{ }}");
    assert_eq!(codes(&source), vec![diagnostic_codes::UNHANDLED_PROMISE_REJECTION_TYPE]);
}

#[test]
fn test_stored_and_returned_promises_are_not_floating() {
    let source = format!(
        "{REJECTS_TYPE_ERROR}const p = h();\nfunction r() {{ return h(); }}\nconst q = () => h();"
    );
    assert!(check(&source).is_empty());
}

#[test]
fn test_native_fetch_rejects_with_type_error() {
    assert_eq!(check("fetch(\"https://example.com\");"), vec![rejection("TypeError")]);
}

#[test]
fn test_declared_rejects_clause_is_what_callers_see() {
    let source = "async function g(): Promise<void> rejects Error { throw new TypeError(\"t\"); }\ng();";
    assert_eq!(check(source), vec![rejection("Error")]);
}
