//! Tests for the flag store.

use super::ConfigError;
use super::flags::{FlagKind, FlagSource, FlagStore, FlagValue, flag};
use super::test_support::{CLI, ENV, default_store, secs};

mod lookup {
    use super::*;

    #[test]
    fn typed_getters_return_values() {
        let store = default_store();

        assert_eq!(
            store.string(flag::HOST).unwrap(),
            "unix:///var/run/docker.sock"
        );
        assert!(!store.bool(flag::TLS_VERIFY).unwrap());
        assert_eq!(store.int(flag::INTERVAL).unwrap(), 86_400);
        assert_eq!(store.duration(flag::STOP_TIMEOUT).unwrap(), secs(10));
        assert!(store.string_array(flag::NOTIFICATION_URL).unwrap().is_empty());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let store = FlagStore::new();

        let result = store.string("no-such-flag");

        assert!(matches!(result, Err(ConfigError::UnknownFlag(ref name)) if name == "no-such-flag"));
    }

    #[test]
    fn wrong_type_is_an_error() {
        let store = default_store();

        let result = store.bool(flag::HOST);

        assert!(matches!(
            result,
            Err(ConfigError::FlagType {
                flag: "host",
                expected: FlagKind::Bool,
                actual: FlagKind::String,
            })
        ));
    }

    #[test]
    fn type_error_message_names_the_flag() {
        let store = default_store();
        let err = store.int(flag::SCHEDULE).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Flag --schedule holds a string value, expected int"
        );
    }

    #[test]
    fn iteration_keeps_registration_order() {
        let store = FlagStore::new()
            .with_default("b", "1")
            .with_default("a", "2")
            .with_default("c", "3");

        let names: Vec<_> = store.iter().map(|(name, _)| name).collect();

        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
    }
}

mod sources {
    use super::*;

    #[test]
    fn default_is_not_explicit() {
        let store = default_store();
        assert!(!store.is_explicit(flag::SCHEDULE).unwrap());
    }

    #[test]
    fn every_user_channel_is_explicit() {
        for source in [FlagSource::CommandLine, FlagSource::Environment, FlagSource::ConfigFile] {
            let store = default_store().with(flag::SCHEDULE, "@hourly", source);
            assert!(store.is_explicit(flag::SCHEDULE).unwrap(), "{source:?}");
        }
    }

    #[test]
    fn insert_replaces_existing_registration() {
        let store = default_store().with(flag::SCHEDULE, "@daily", CLI);

        let flag = store.get(flag::SCHEDULE).unwrap();
        assert_eq!(flag.value(), &FlagValue::String("@daily".to_string()));
        assert_eq!(flag.source(), FlagSource::CommandLine);
        assert_eq!(store.len(), default_store().len());
    }
}

mod mutation {
    use super::*;

    #[test]
    fn set_keeps_source() {
        let mut store = default_store().with(flag::SCHEDULE, "@hourly", ENV);

        store.set(flag::SCHEDULE, "@daily").unwrap();

        let flag = store.get(flag::SCHEDULE).unwrap();
        assert_eq!(flag.source(), FlagSource::Environment);
        assert_eq!(store.string(flag::SCHEDULE).unwrap(), "@daily");
    }

    #[test]
    fn set_rejects_kind_change() {
        let mut store = default_store();

        let result = store.set(flag::INTERVAL, "ten");

        assert!(matches!(
            result,
            Err(ConfigError::FlagType {
                flag: "interval",
                expected: FlagKind::Int,
                actual: FlagKind::String,
            })
        ));
        assert_eq!(store.int(flag::INTERVAL).unwrap(), 86_400);
    }

    #[test]
    fn set_unknown_flag_fails() {
        let mut store = FlagStore::new();
        assert!(matches!(
            store.set("missing", true),
            Err(ConfigError::UnknownFlag(_))
        ));
    }

    #[test]
    fn set_if_default_skips_explicit_values() {
        let mut store = default_store().with(flag::NOTIFICATION_REPORT, false, CLI);

        let changed = store.set_if_default(flag::NOTIFICATION_REPORT, true).unwrap();

        assert!(!changed);
        assert!(!store.bool(flag::NOTIFICATION_REPORT).unwrap());
    }

    #[test]
    fn set_if_default_replaces_defaults() {
        let mut store = default_store();

        let changed = store.set_if_default(flag::NOTIFICATION_REPORT, true).unwrap();

        assert!(changed);
        assert!(store.bool(flag::NOTIFICATION_REPORT).unwrap());
        assert!(!store.is_explicit(flag::NOTIFICATION_REPORT).unwrap());
    }

    #[test]
    fn fill_records_source() {
        let mut store = default_store();

        let filled = store
            .fill(flag::INTERVAL, 300_u64, FlagSource::ConfigFile)
            .unwrap();

        assert!(filled);
        assert_eq!(store.int(flag::INTERVAL).unwrap(), 300);
        assert_eq!(
            store.get(flag::INTERVAL).unwrap().source(),
            FlagSource::ConfigFile
        );
    }

    #[test]
    fn fill_never_overrides_user_values() {
        let mut store = default_store().with(flag::INTERVAL, 60_u64, ENV);

        let filled = store
            .fill(flag::INTERVAL, 300_u64, FlagSource::ConfigFile)
            .unwrap();

        assert!(!filled);
        assert_eq!(store.int(flag::INTERVAL).unwrap(), 60);
    }

    #[test]
    fn append_unique_suppresses_duplicates() {
        let mut store = default_store().with(
            flag::NOTIFICATION_URL,
            vec!["logger://".to_string()],
            CLI,
        );

        assert!(!store.append_unique(flag::NOTIFICATION_URL, "logger://").unwrap());
        assert!(store.append_unique(flag::NOTIFICATION_URL, "slack://x").unwrap());

        assert_eq!(
            store.string_array(flag::NOTIFICATION_URL).unwrap(),
            ["logger://", "slack://x"]
        );
    }

    #[test]
    fn append_unique_requires_array() {
        let mut store = default_store();

        let result = store.append_unique(flag::HOST, "x");

        assert!(matches!(
            result,
            Err(ConfigError::FlagType {
                expected: FlagKind::StringArray,
                ..
            })
        ));
    }
}

mod kinds {
    use super::*;

    #[test]
    fn value_kinds() {
        assert_eq!(FlagValue::from("x").kind(), FlagKind::String);
        assert_eq!(FlagValue::from(true).kind(), FlagKind::Bool);
        assert_eq!(FlagValue::from(1_u64).kind(), FlagKind::Int);
        assert_eq!(FlagValue::from(secs(1)).kind(), FlagKind::Duration);
        assert_eq!(FlagValue::from(Vec::<String>::new()).kind(), FlagKind::StringArray);
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(FlagKind::StringArray.to_string(), "stringArray");
        assert_eq!(FlagKind::Duration.to_string(), "duration");
    }
}
