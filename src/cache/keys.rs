//! Cache Key Builders
//!
//! Colon-delimited keys namespaced by entity kind, then query shape, then
//! parameters. The same logical query always produces the same key.

// == Cache Key ==
/// Namespace for cache key constructors.
pub struct CacheKey;

impl CacheKey {
    pub fn gym(id: &str) -> String {
        format!("gym:{}", id)
    }

    pub fn all_gyms() -> String {
        "gyms:all".to_string()
    }

    /// Search key; the query is trimmed and lower-cased so case variants share an entry.
    pub fn gym_search(query: &str) -> String {
        format!("gyms:search:{}", normalize_query(query))
    }

    pub fn favorite_gyms(user_id: &str) -> String {
        format!("gyms:favorites:{}", user_id)
    }

    pub fn event(id: &str) -> String {
        format!("event:{}", id)
    }

    pub fn gym_events(gym_id: &str) -> String {
        format!("events:gym:{}", gym_id)
    }

    pub fn favorite_events(user_id: &str) -> String {
        format!("events:favorites:{}", user_id)
    }

    pub fn user(id: &str) -> String {
        format!("user:{}", id)
    }

    /// Session slot for the signed-in user; its own namespace so no user id can collide with it.
    pub fn current_user() -> String {
        "session:user".to_string()
    }
}

/// Normalizes a free-text query component.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_keys() {
        assert_eq!(CacheKey::gym("g1"), "gym:g1");
        assert_eq!(CacheKey::event("e1"), "event:e1");
        assert_eq!(CacheKey::user("u1"), "user:u1");
        assert_eq!(CacheKey::current_user(), "session:user");
    }

    #[test]
    fn test_list_keys() {
        assert_eq!(CacheKey::all_gyms(), "gyms:all");
        assert_eq!(CacheKey::favorite_gyms("u1"), "gyms:favorites:u1");
        assert_eq!(CacheKey::gym_events("g1"), "events:gym:g1");
        assert_eq!(CacheKey::favorite_events("u1"), "events:favorites:u1");
    }

    #[test]
    fn test_search_key_is_case_insensitive() {
        assert_eq!(CacheKey::gym_search("Boulder"), "gyms:search:boulder");
        assert_eq!(
            CacheKey::gym_search("  BOULDER "),
            CacheKey::gym_search("boulder")
        );
    }

    #[test]
    fn test_kinds_do_not_collide() {
        let id = "current";
        assert_ne!(CacheKey::gym(id), CacheKey::user(id));
        assert_ne!(CacheKey::gym(id), CacheKey::event(id));
        assert_ne!(CacheKey::favorite_gyms(id), CacheKey::favorite_events(id));
    }

    #[test]
    fn test_session_slot_does_not_collide_with_user_ids() {
        for id in ["current", "user", "session:user", ""] {
            assert_ne!(CacheKey::user(id), CacheKey::current_user());
        }
    }
}
