#[cfg(test)]
mod tests {
    use crate::*;
    use msgbox_core::{
        ComposeGuard, Scope, TestClock, pending_timers, run_due_timers, with_local,
    };
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, move || c.set(c.get() + 1))
    }

    fn elapse(clock: &TestClock, ms: u64) -> usize {
        clock.advance(Duration::from_millis(ms));
        run_due_timers()
    }

    fn assert_defaults(mb: &MessageBox) {
        let s = mb.state();
        assert!(!s.visible.get());
        assert!(!s.loading.get());
        assert_eq!(s.title.get(), "");
        assert_eq!(s.content.get(), "");
        assert!(!s.is_html.get());
        assert_eq!(s.width.get(), 380.0);
        assert_eq!(s.top.get(), "30vh");
        assert_eq!(s.confirm_button_text.get(), "确定");
        assert_eq!(s.cancel_button_text.get(), "取消");
        assert!(s.submit_action().is_noop());
        assert!(s.close_action().is_noop());
    }

    #[test]
    fn test_starts_idle() {
        let mb = MessageBox::new();
        assert_defaults(&mb);
        assert!(!mb.is_closing());
    }

    #[test]
    fn test_confirm_runs_cached_submit() {
        let mb = MessageBox::new();
        let (calls, on_submit) = counter();

        mb.set_message_box(
            MessageBoxPatch::new()
                .title("Confirm")
                .content("Proceed?")
                .on_submit(on_submit),
        );
        assert!(mb.state().visible.get());
        assert_eq!(mb.state().title.get(), "Confirm");
        assert!(!mb.state().loading.get());

        mb.state().submit();
        assert!(mb.state().loading.get());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_hide_from_submit_then_reset_after_delay() {
        let clock = TestClock::install();
        let mb = MessageBox::new();

        let handle = mb.clone();
        mb.set_message_box(
            MessageBoxPatch::new()
                .title("Confirm")
                .content("Proceed?")
                .on_submit(move || {
                    handle.set_message_box(MessageBoxPatch::new().visible(false));
                    handle.set_message_box(MessageBoxPatch::new().loading(false));
                }),
        );
        mb.state().submit();

        assert!(!mb.state().visible.get());
        assert!(!mb.state().loading.get());
        assert_eq!(mb.state().title.get(), "Confirm");
        assert!(mb.is_closing());

        assert_eq!(elapse(&clock, 199), 0);
        assert_eq!(mb.state().title.get(), "Confirm");

        assert_eq!(elapse(&clock, 1), 1);
        assert_eq!(mb.state().title.get(), "");
        assert!(mb.state().submit_action().is_noop());
        assert!(!mb.is_closing());
    }

    #[test]
    fn test_reset_after_close_restores_every_default() {
        let clock = TestClock::install();
        let mb = MessageBox::new();
        let (submits, on_submit) = counter();
        let (closes, on_close) = counter();

        mb.set_message_box(
            MessageBoxPatch::new()
                .title("Delete")
                .html("<b>gone</b>")
                .width(500.0)
                .top("10vh")
                .confirm_button_text("Delete")
                .cancel_button_text("Keep")
                .loading(true)
                .on_submit(on_submit)
                .on_close(on_close),
        );
        mb.state().close();
        elapse(&clock, 200);

        assert_defaults(&mb);
        assert_eq!(closes.get(), 1);

        // The disarmed actions have no observable effect.
        mb.state().submit();
        mb.state().close();
        assert_eq!(submits.get(), 0);
        assert_eq!(closes.get(), 1);
        assert!(!mb.state().loading.get());
        assert_eq!(pending_timers(), 0);
    }

    #[test]
    fn test_double_close_notifies_once() {
        let clock = TestClock::install();
        let mb = MessageBox::new();
        let (closes, on_close) = counter();

        mb.set_message_box(
            MessageBoxPatch::new()
                .content("Leave?")
                .on_submit(|| {})
                .on_close(on_close),
        );

        mb.state().close();
        mb.state().close();
        assert_eq!(closes.get(), 1);
        assert_eq!(pending_timers(), 1);

        elapse(&clock, 50);
        mb.state().close();
        assert_eq!(closes.get(), 1);

        assert_eq!(elapse(&clock, 150), 1);
        assert_eq!(pending_timers(), 0);
        assert_defaults(&mb);
    }

    #[test]
    fn test_content_opens_dialog() {
        let mb = MessageBox::new();
        mb.set_message_box(MessageBoxPatch::new().content("X"));
        assert!(mb.state().visible.get());
        assert_eq!(mb.state().content.get(), "X");
    }

    #[test]
    fn test_empty_or_missing_content_leaves_visibility() {
        let mb = MessageBox::new();
        mb.set_message_box(MessageBoxPatch::new().content(""));
        assert!(!mb.state().visible.get());

        mb.set_message_box(MessageBoxPatch::new().title("only a title"));
        assert!(!mb.state().visible.get());
        assert_eq!(mb.state().title.get(), "only a title");

        mb.set_message_box(MessageBoxPatch::new());
        assert_eq!(mb.state().title.get(), "only a title");
    }

    #[test]
    fn test_direct_hide_still_closes() {
        let clock = TestClock::install();
        let mb = MessageBox::new();
        let (closes, on_close) = counter();

        mb.set_message_box(
            MessageBoxPatch::new()
                .title("t")
                .content("c")
                .on_submit(|| {})
                .on_close(on_close),
        );

        // e.g. the renderer flipping the flag on backdrop click
        mb.state().visible.set(false);
        assert_eq!(closes.get(), 1);
        assert!(mb.is_closing());

        elapse(&clock, 200);
        assert_defaults(&mb);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_content_wins_over_hide_in_same_patch() {
        let clock = TestClock::install();
        let mb = MessageBox::new();
        let (closes, on_close) = counter();
        let flips = Rc::new(RefCell::new(Vec::new()));

        mb.set_message_box(
            MessageBoxPatch::new()
                .content("a")
                .on_submit(|| {})
                .on_close(on_close),
        );
        let f = flips.clone();
        mb.state().visible.watch(move |v, _| f.borrow_mut().push(*v));

        mb.set_message_box(MessageBoxPatch::new().visible(false).content("b"));
        assert!(mb.state().visible.get());
        assert!(!mb.is_closing());
        assert_eq!(closes.get(), 0);
        assert!(flips.borrow().is_empty());

        elapse(&clock, 200);
        assert!(mb.state().visible.get());
        assert_eq!(mb.state().content.get(), "b");
    }

    #[test]
    fn test_hide_patch_closes_with_its_own_callback() {
        let clock = TestClock::install();
        let mb = MessageBox::new();
        let (old_closes, on_old_close) = counter();
        let (new_closes, on_new_close) = counter();

        mb.set_message_box(
            MessageBoxPatch::new()
                .content("a")
                .on_submit(|| {})
                .on_close(on_old_close),
        );
        mb.set_message_box(MessageBoxPatch::new().visible(false).on_close(on_new_close));
        assert_eq!(old_closes.get(), 0);
        assert_eq!(new_closes.get(), 1);
        assert!(mb.is_closing());

        elapse(&clock, 200);
        assert_defaults(&mb);
        assert_eq!(new_closes.get(), 1);
    }

    #[test]
    fn test_hide_patch_fields_land_before_close() {
        let mb = MessageBox::new();
        let seen = Rc::new(RefCell::new(None));

        let s = seen.clone();
        let loading = mb.state().loading.clone();
        mb.set_message_box(
            MessageBoxPatch::new()
                .content("a")
                .loading(true)
                .on_close(move || *s.borrow_mut() = Some(loading.get())),
        );
        mb.set_message_box(MessageBoxPatch::new().visible(false).loading(false));
        assert_eq!(*seen.borrow(), Some(false));
        assert!(mb.is_closing());
    }

    #[test]
    fn test_hide_drops_cached_submit() {
        let clock = TestClock::install();
        let mb = MessageBox::new();
        let (submits, on_submit) = counter();

        mb.set_message_box(MessageBoxPatch::new().content("a").on_submit(on_submit));
        mb.set_message_box(MessageBoxPatch::new().visible(false));
        elapse(&clock, 200);

        // Re-arm with only a close callback: the old submit must not come back.
        mb.set_message_box(MessageBoxPatch::new().content("b").on_close(|| {}));
        mb.state().submit();
        assert_eq!(submits.get(), 0);
        assert!(mb.state().loading.get());
    }

    #[test]
    fn test_field_patch_keeps_actions() {
        let mb = MessageBox::new();
        let (submits, on_submit) = counter();
        mb.set_message_box(MessageBoxPatch::new().content("Proceed?").on_submit(on_submit));

        let submit = mb.state().submit_action();
        let close = mb.state().close_action();
        assert!(!submit.is_noop());
        assert!(!close.is_noop());

        mb.state().submit();
        mb.set_message_box(MessageBoxPatch::new().loading(false));

        assert!(!mb.state().loading.get());
        assert!(mb.state().submit_action().ptr_eq(&submit));
        assert!(mb.state().close_action().ptr_eq(&close));

        mb.state().submit();
        assert_eq!(submits.get(), 2);
    }

    #[test]
    fn test_later_submit_replaces_earlier() {
        let mb = MessageBox::new();
        let (first, on_first) = counter();
        let (second, on_second) = counter();

        mb.set_message_box(MessageBoxPatch::new().content("a").on_submit(on_first));
        mb.set_message_box(MessageBoxPatch::new().content("b").on_submit(on_second));
        mb.state().submit();

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_close_only_patch_rearms_both_actions() {
        let mb = MessageBox::new();
        let (submits, on_submit) = counter();
        let (closes, on_close) = counter();

        mb.set_message_box(MessageBoxPatch::new().content("a").on_submit(on_submit));
        let before = mb.state().submit_action();

        mb.set_message_box(MessageBoxPatch::new().on_close(on_close));
        assert!(!mb.state().submit_action().ptr_eq(&before));
        assert!(!mb.state().submit_action().is_noop());

        mb.state().submit();
        assert_eq!(submits.get(), 1);
        mb.state().close();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_submit_without_callbacks_is_noop() {
        let mb = MessageBox::new();
        mb.set_message_box(MessageBoxPatch::new().content("no callbacks"));
        mb.state().submit();
        assert!(!mb.state().loading.get());
        assert!(mb.state().visible.get());
    }

    #[test]
    fn test_reopen_while_closing_survives_pending_reset() {
        let clock = TestClock::install();
        let mb = MessageBox::new();
        let (closes, on_close) = counter();

        mb.set_message_box(
            MessageBoxPatch::new()
                .title("first")
                .content("first")
                .on_submit(|| {})
                .on_close(on_close),
        );
        mb.state().close();
        assert!(mb.is_closing());

        elapse(&clock, 100);
        let (seconds, on_second) = counter();
        mb.set_message_box(
            MessageBoxPatch::new()
                .content("second")
                .on_submit(on_second),
        );
        assert!(!mb.is_closing());
        assert_eq!(pending_timers(), 0);
        assert_eq!(mb.state().title.get(), "");
        assert_eq!(mb.state().content.get(), "second");
        assert!(mb.state().visible.get());

        elapse(&clock, 200);
        assert!(mb.state().visible.get());
        mb.state().submit();
        assert_eq!(seconds.get(), 1);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_explicit_reset() {
        let mb = MessageBox::new();
        let (closes, on_close) = counter();
        mb.set_message_box(
            MessageBoxPatch::new()
                .title("t")
                .content("c")
                .on_submit(|| {})
                .on_close(on_close),
        );

        mb.reset();
        assert_defaults(&mb);
        // Actions were disarmed before `visible` dropped.
        assert_eq!(closes.get(), 0);
        assert_eq!(pending_timers(), 0);
    }

    #[test]
    fn test_reset_cancels_pending_close() {
        let clock = TestClock::install();
        let mb = MessageBox::new();
        mb.set_message_box(MessageBoxPatch::new().content("c").on_submit(|| {}));
        mb.state().close();
        assert_eq!(pending_timers(), 1);

        mb.reset();
        assert_eq!(pending_timers(), 0);
        assert!(!mb.is_closing());
        assert_eq!(elapse(&clock, 500), 0);
    }

    #[test]
    fn test_close_callback_sees_hidden_dialog() {
        let mb = MessageBox::new();
        let seen = Rc::new(Cell::new(None));

        let state = mb.state().clone();
        let s = seen.clone();
        mb.set_message_box(
            MessageBoxPatch::new()
                .content("c")
                .on_submit(|| {})
                .on_close(move || s.set(Some(state.visible.get()))),
        );
        mb.state().close();
        assert_eq!(seen.get(), Some(false));
    }

    #[test]
    fn test_custom_defaults() {
        let clock = TestClock::install();
        let defaults = MessageBoxDefaults::from_json(
            r#"{ "width": 480, "top": "20vh", "cancelButtonText": "Cancel", "closeDelayMs": 50 }"#,
        )
        .unwrap();
        let mb = MessageBox::with_defaults(defaults);
        assert_eq!(mb.state().width.get(), 480.0);
        assert_eq!(mb.state().confirm_button_text.get(), "确定");
        assert_eq!(mb.state().cancel_button_text.get(), "Cancel");

        mb.set_message_box(
            MessageBoxPatch::new()
                .content("c")
                .width(300.0)
                .on_submit(|| {}),
        );
        mb.state().close();
        assert_eq!(elapse(&clock, 50), 1);
        assert_eq!(mb.state().width.get(), 480.0);
        assert_eq!(mb.state().top.get(), "20vh");
    }

    #[test]
    fn test_invalid_defaults() {
        let err = MessageBoxDefaults::from_json(r#"{ "width": "wide" }"#).unwrap_err();
        assert!(matches!(err, MessageBoxError::InvalidDefaults(_)));
        assert!(err.to_string().starts_with("invalid message box defaults"));
    }

    #[test]
    fn test_defaults_json() {
        let json = MessageBoxDefaults::default().to_json().unwrap();
        assert!(json.contains("\"closeDelayMs\":200"));
        assert_eq!(
            MessageBoxDefaults::from_json(&json).unwrap(),
            MessageBoxDefaults::default()
        );
    }

    #[test]
    fn test_inject_without_provider() {
        assert!(try_use_message_box().is_none());
        assert!(matches!(
            use_message_box(),
            Err(MessageBoxError::NotProvided)
        ));
    }

    #[test]
    fn test_descendants_share_controller() {
        let root = MessageBox::new();
        let opened = provide_message_box(root.clone(), || {
            with_local(42u8, || {
                let mb = use_message_box().unwrap();
                mb.set_message_box(MessageBoxPatch::new().content("from a leaf"));
                mb.state().visible.get()
            })
        });
        assert!(opened);
        assert!(root.state().visible.get());
        assert_eq!(root.state().content.get(), "from a leaf");
        assert!(try_use_message_box().is_none());
    }

    #[test]
    fn test_create_provides_to_current_frame() {
        let mb = create_message_box();
        let found = use_message_box().unwrap();
        found.set_message_box(MessageBoxPatch::new().title("shared"));
        assert_eq!(mb.state().title.get(), "shared");
    }

    #[test]
    fn test_remember_is_stable_across_passes() {
        let first = {
            let guard = ComposeGuard::begin();
            guard.compose(remember_message_box)
        };
        first.set_message_box(MessageBoxPatch::new().title("kept"));

        let guard = ComposeGuard::begin();
        let second = guard.compose(remember_message_box);
        assert_eq!(second.state().title.get(), "kept");
        assert_eq!(use_message_box().unwrap().state().title.get(), "kept");
        // Still watching after the first pass's scope went away.
        assert_eq!(second.state().visible.subscriber_count(), 1);
    }

    #[test]
    fn test_scope_dispose_detaches_controller() {
        let clock = TestClock::install();
        let scope = Scope::new();
        let mb = scope.run(MessageBox::new);
        let (closes, on_close) = counter();

        mb.set_message_box(
            MessageBoxPatch::new()
                .content("c")
                .on_submit(|| {})
                .on_close(on_close),
        );
        mb.state().close();
        assert_eq!(pending_timers(), 1);

        scope.dispose();
        assert_eq!(pending_timers(), 0);
        assert!(mb.state().close_action().is_noop());

        // No longer watching: hiding does nothing and no reset happens.
        mb.state().visible.set(true);
        mb.state().visible.set(false);
        assert_eq!(closes.get(), 1);
        assert_eq!(elapse(&clock, 500), 0);
        assert_eq!(mb.state().content.get(), "c");
    }

    #[test]
    fn test_dispose_without_scope() {
        let mb = MessageBox::new();
        assert_eq!(mb.state().visible.subscriber_count(), 1);
        mb.dispose();
        assert_eq!(mb.state().visible.subscriber_count(), 0);
        mb.dispose();
    }

    #[test]
    fn test_view_snapshot() {
        let mb = MessageBox::new();
        mb.set_message_box(
            MessageBoxPatch::new()
                .title("提示")
                .html("<span>abcd.1234</span>")
                .on_submit(|| {}),
        );
        let view = mb.state().view();
        assert!(view.visible);
        assert!(view.confirm_enabled);
        assert_eq!(view.body, Body::Html("<span>abcd.1234</span>".into()));
        assert_eq!(view.confirm_label, "确定");

        mb.state().submit();
        let view = mb.state().view();
        assert!(view.loading);
        assert!(!view.confirm_enabled);

        mb.set_message_box(MessageBoxPatch::new().content("plain").is_html(false));
        assert_eq!(mb.state().view().body, Body::Text("plain".into()));
    }

    #[test]
    fn test_renderer_sees_transitions_in_order() {
        let clock = TestClock::install();
        let mb = MessageBox::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        mb.state().visible.watch(move |v, _| l.borrow_mut().push(format!("visible={v}")));
        let l = log.clone();
        mb.state().loading.watch(move |v, _| l.borrow_mut().push(format!("loading={v}")));

        let handle = mb.clone();
        mb.set_message_box(MessageBoxPatch::new().content("c").on_submit(move || {
            handle.set_message_box(MessageBoxPatch::new().loading(false));
        }));
        mb.state().submit();
        mb.state().close();
        elapse(&clock, 200);

        assert_eq!(
            *log.borrow(),
            vec!["visible=true", "loading=true", "loading=false", "visible=false"]
        );
    }

    #[test]
    fn test_patch_fields() {
        let p = MessageBoxPatch::new().html("<b/>").on_close(|| {});
        assert_eq!(
            p.fields(),
            PatchFields::CONTENT | PatchFields::IS_HTML | PatchFields::ON_CLOSE
        );
        assert!(p.fields().intersects(PatchFields::CALLBACKS));
        assert!(MessageBoxPatch::new().fields().is_empty());
    }
}
