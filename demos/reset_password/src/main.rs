//! Headless walk through the "reset user password" confirmation.
//!
//! A root provides the controller, a leaf opens the dialog, and a stand-in
//! renderer prints each frame and presses the buttons. Run with
//! `RUST_LOG=debug` to see the controller's transitions.

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, bail};
use msgbox::*;
use msgbox_core::{ComposeGuard, SystemClock, run_due_timers, set_clock};

struct User {
    id: u32,
    name: &'static str,
}

/// Stand-in for a backend call; the second attempt fails.
fn reset_user_password(user: &User, attempts: &Cell<u32>) -> anyhow::Result<()> {
    attempts.set(attempts.get() + 1);
    if attempts.get() > 1 {
        bail!("password for user {} was already reset", user.id);
    }
    Ok(())
}

fn ask_reset(user: Rc<User>, attempts: Rc<Cell<u32>>) -> anyhow::Result<()> {
    let mb = use_message_box().context("dialog host missing")?;
    let handle = mb.clone();
    mb.set_message_box(
        MessageBoxPatch::new()
            .title("提示")
            .html(format!(
                "确定将 <b>{}</b> 的密码重置为 <span class=\"text-primary\">abcd.1234</span> 吗？",
                user.name
            ))
            .on_submit(move || {
                match reset_user_password(&user, &attempts) {
                    Ok(()) => {
                        log::info!("reset ok for {}", user.name);
                        handle.set_message_box(MessageBoxPatch::new().visible(false));
                    }
                    Err(e) => log::error!("reset failed: {e:#}"),
                }
                handle.set_message_box(MessageBoxPatch::new().loading(false));
            })
            .on_close(|| log::info!("dialog closing")),
    );
    Ok(())
}

fn render(state: &MessageBoxState) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(&state.view())?);
    Ok(())
}

/// Let the closing transition finish.
fn settle(defaults: &MessageBoxDefaults) {
    thread::sleep(defaults.close_delay() + Duration::from_millis(10));
    run_due_timers();
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    set_clock(SystemClock);

    let guard = ComposeGuard::begin();
    let mb = guard.compose(remember_message_box);
    let user = Rc::new(User {
        id: 7,
        name: "alice",
    });
    let attempts = Rc::new(Cell::new(0));

    // First round: confirm succeeds and closes the dialog.
    ask_reset(user.clone(), attempts.clone())?;
    render(mb.state())?;
    mb.state().submit();
    render(mb.state())?;
    settle(mb.defaults());
    render(mb.state())?;

    // Second round: confirm fails, the dialog stays open until cancelled.
    ask_reset(user, attempts)?;
    mb.state().submit();
    render(mb.state())?;
    mb.state().close();
    mb.state().close();
    settle(mb.defaults());
    render(mb.state())?;

    Ok(())
}
