use crate::routing::{Route, Router};

#[test]
fn test_route_parsing() {
    assert_eq!(Route::parse("/"), Route::List);
    assert_eq!(Route::parse("/issues/42"), Route::Detail(42));
    assert_eq!(Route::parse("/issues/abc"), Route::List);
    assert_eq!(Route::parse("/issues/42/edit"), Route::List);
    assert_eq!(Route::parse("/admin"), Route::List);
}

#[test]
fn test_oversized_digit_id_is_still_detail() {
    let raw = "99999999999999999999999";
    let route = Route::parse(&format!("/issues/{}", raw));
    assert_eq!(route, Route::UnknownIssue(raw.to_string()));
    assert!(route.is_detail());
    assert_eq!(route.path(), format!("/issues/{}", raw));

    assert_eq!(Route::parse("/issues/18446744073709551615"), Route::Detail(u64::MAX));
    assert!(!Route::List.is_detail());
}

#[test]
fn test_route_paths() {
    assert_eq!(Route::List.path(), "/");
    assert_eq!(Route::Detail(5).path(), "/issues/5");
}

#[test]
fn test_navigate_truncates_forward_history() {
    let mut router = Router::new("/");
    router.navigate("/issues/1");
    router.navigate("/issues/2");

    assert_eq!(router.back(), Some(Route::Detail(1)));
    assert!(router.can_go_forward());

    router.navigate("/issues/3");
    assert!(!router.can_go_forward());
    assert_eq!(router.forward(), None);

    assert_eq!(router.back(), Some(Route::Detail(1)));
    assert_eq!(router.back(), Some(Route::List));
    assert_eq!(router.back(), None);
    assert!(!router.can_go_back());
}
