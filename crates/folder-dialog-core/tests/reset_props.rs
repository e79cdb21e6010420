use folder_dialog_core::{DialogPhase, FormField};
use folder_dialog_test_utils::{setup_dialog, ScriptedGateway};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Edit {
    Type(String),
    SubmitEmpty,
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        ".{0,12}".prop_map(Edit::Type),
        Just(Edit::SubmitEmpty),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_close_always_resets_form(edits in prop::collection::vec(edit(), 0..8)) {
        let rt = runtime();
        let gateway = Arc::new(ScriptedGateway::new());
        let t = setup_dialog(gateway.clone());

        rt.block_on(async {
            t.dialog.open().unwrap();
            for e in &edits {
                match e {
                    Edit::Type(value) => t.dialog.set_field(FormField::Name, value.clone()).unwrap(),
                    Edit::SubmitEmpty => {
                        t.dialog.set_field(FormField::Name, "").unwrap();
                        t.dialog.submit().await.unwrap();
                    }
                }
            }
            t.dialog.request_close().unwrap();
            t.dialog.open().unwrap();
        });

        let snapshot = t.dialog.snapshot();
        prop_assert_eq!(snapshot.phase, DialogPhase::Idle);
        prop_assert_eq!(snapshot.name, "");
        prop_assert!(snapshot.field_errors.is_empty());
        prop_assert!(!snapshot.is_submitting);
        prop_assert_eq!(gateway.calls(), 0);
    }
}
