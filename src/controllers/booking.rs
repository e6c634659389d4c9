use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::future::TimeoutFuture;
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{FormData, HtmlButtonElement, HtmlElement, HtmlFormElement};

use super::relay::{self, SubmitError};
use crate::dom;

/// How long the success panel stays up before the form comes back.
pub const SUCCESS_DISPLAY_MS: u32 = 5_000;

const SENDING_LABEL: &str = "Sending...";
const FAILURE_ALERT: &str = "Something went wrong. Please try again.";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    #[default]
    Idle,
    Sending,
    Succeeded,
}

/// What the submission flow does to the page at each transition.
pub trait BookingView {
    /// Disable the submit control and show the sending label.
    fn show_sending(&mut self);
    /// Hide the form and show the success panel.
    fn show_success(&mut self);
    /// Re-enable the submit control and alert the user.
    fn show_failure(&mut self);
    /// Empty and show the form, hide the success panel, re-enable submit.
    fn restore(&mut self);
}

/// `Idle -> Sending -> Succeeded -> Idle`, or `Sending -> Idle` on failure.
#[derive(Debug, Default)]
pub struct BookingFlow {
    state: Submission,
}

impl BookingFlow {
    pub fn state(&self) -> Submission {
        self.state
    }

    /// Starts a submission; false if one is already in progress.
    pub fn begin(&mut self, view: &mut impl BookingView) -> bool {
        if self.state != Submission::Idle {
            return false;
        }
        self.state = Submission::Sending;
        view.show_sending();
        true
    }

    pub fn complete<T, E>(&mut self, outcome: &Result<T, E>, view: &mut impl BookingView) {
        if self.state != Submission::Sending {
            return;
        }
        match outcome {
            Ok(_) => {
                self.state = Submission::Succeeded;
                view.show_success();
            }
            Err(_) => {
                self.state = Submission::Idle;
                view.show_failure();
            }
        }
    }

    /// Ends the success display.
    pub fn settle(&mut self, view: &mut impl BookingView) {
        if self.state != Submission::Succeeded {
            return;
        }
        self.state = Submission::Idle;
        view.restore();
    }
}

struct PageView {
    form: HtmlFormElement,
    success: Option<HtmlElement>,
    submit: Option<HtmlButtonElement>,
    original_label: Option<String>,
}

impl PageView {
    fn release_submit(&mut self) {
        let Some(submit) = &self.submit else {
            return;
        };
        submit.set_disabled(false);
        if let Some(label) = self.original_label.take() {
            submit.set_inner_html(&label);
        }
    }
}

impl BookingView for PageView {
    fn show_sending(&mut self) {
        let Some(submit) = &self.submit else {
            return;
        };
        self.original_label = Some(submit.inner_html());
        submit.set_disabled(true);
        match submit.query_selector("span") {
            Ok(Some(span)) => span.set_text_content(Some(SENDING_LABEL)),
            _ => submit.set_text_content(Some(SENDING_LABEL)),
        }
    }

    fn show_success(&mut self) {
        dom::set_style(&self.form, "display", "none");
        if let Some(success) = &self.success {
            dom::add_class(success, "active");
        }
    }

    fn show_failure(&mut self) {
        self.release_submit();
        if let Some(window) = dom::window() {
            let _ = window.alert_with_message(FAILURE_ALERT);
        }
    }

    fn restore(&mut self) {
        self.form.reset();
        dom::set_style(&self.form, "display", "flex");
        if let Some(success) = &self.success {
            dom::remove_class(success, "active");
        }
        self.release_submit();
    }
}

struct Booking {
    flow: BookingFlow,
    view: PageView,
}

/// Sends `#bookingForm` through the relay without leaving the page.
pub struct BookingForm {
    _on_submit: EventListener,
}

impl BookingForm {
    pub fn install() -> Option<Self> {
        let form: HtmlFormElement = dom::by_id("bookingForm")?;
        let submit = form
            .query_selector(".form-submit")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let booking = Rc::new(RefCell::new(Booking {
            flow: BookingFlow::default(),
            view: PageView {
                form: form.clone(),
                success: dom::by_id("formSuccess"),
                submit,
                original_label: None,
            },
        }));

        let on_submit = EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            {
                let form = form.clone();
                move |event| {
                    event.prevent_default();
                    submit_inquiry(&form, Rc::clone(&booking));
                }
            },
        );

        Some(BookingForm {
            _on_submit: on_submit,
        })
    }
}

fn submit_inquiry(form: &HtmlFormElement, booking: Rc<RefCell<Booking>>) {
    {
        let mut booking = booking.borrow_mut();
        let Booking { flow, view } = &mut *booking;
        if !flow.begin(view) {
            debug!("Ignoring submit while {:?}", flow.state());
            return;
        }
    }

    let data = match FormData::new_with_form(form) {
        Ok(data) => data,
        Err(err) => {
            let err = SubmitError::Payload(format!("{:?}", err));
            warn!("Booking inquiry failed: {}", err);
            let outcome: Result<(), _> = Err(err);
            let mut booking = booking.borrow_mut();
            let Booking { flow, view } = &mut *booking;
            flow.complete(&outcome, view);
            return;
        }
    };

    spawn_local(async move {
        let outcome = relay::deliver(data).await;
        match &outcome {
            Ok(reply) => info!(
                "Booking inquiry delivered (success: {:?}): {}",
                reply.success,
                reply.message.as_deref().unwrap_or("no message")
            ),
            Err(err) => warn!("Booking inquiry failed: {}", err),
        }

        let succeeded = {
            let mut booking = booking.borrow_mut();
            let Booking { flow, view } = &mut *booking;
            flow.complete(&outcome, view);
            flow.state() == Submission::Succeeded
        };
        if !succeeded {
            return;
        }

        TimeoutFuture::new(SUCCESS_DISPLAY_MS).await;
        let mut booking = booking.borrow_mut();
        let Booking { flow, view } = &mut *booking;
        flow.settle(view);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingView {
        calls: Vec<&'static str>,
        submit_enabled: bool,
        form_visible: bool,
        success_visible: bool,
        alerted: bool,
    }

    impl RecordingView {
        fn new() -> Self {
            RecordingView {
                submit_enabled: true,
                form_visible: true,
                ..Default::default()
            }
        }
    }

    impl BookingView for RecordingView {
        fn show_sending(&mut self) {
            self.calls.push("sending");
            self.submit_enabled = false;
        }

        fn show_success(&mut self) {
            self.calls.push("success");
            self.form_visible = false;
            self.success_visible = true;
        }

        fn show_failure(&mut self) {
            self.calls.push("failure");
            self.submit_enabled = true;
            self.alerted = true;
        }

        fn restore(&mut self) {
            self.calls.push("restore");
            self.form_visible = true;
            self.success_visible = false;
            self.submit_enabled = true;
        }
    }

    #[test]
    fn successful_submission_shows_panel_then_restores() {
        let mut flow = BookingFlow::default();
        let mut view = RecordingView::new();

        assert!(flow.begin(&mut view));
        assert_eq!(flow.state(), Submission::Sending);
        assert!(!view.submit_enabled);

        flow.complete(&Ok::<_, SubmitError>(()), &mut view);
        assert_eq!(flow.state(), Submission::Succeeded);
        assert!(view.success_visible);
        assert!(!view.form_visible);
        assert!(!view.submit_enabled);

        flow.settle(&mut view);
        assert_eq!(flow.state(), Submission::Idle);
        assert!(view.form_visible);
        assert!(!view.success_visible);
        assert!(view.submit_enabled);
        assert!(!view.alerted);
        assert_eq!(view.calls, ["sending", "success", "restore"]);
    }

    #[test]
    fn rejected_status_fails_immediately() {
        let mut flow = BookingFlow::default();
        let mut view = RecordingView::new();

        flow.begin(&mut view);
        flow.complete(&Err::<(), _>(SubmitError::Status(500)), &mut view);

        assert_eq!(flow.state(), Submission::Idle);
        assert!(view.submit_enabled);
        assert!(view.alerted);
        assert!(!view.success_visible);
        assert_eq!(view.calls, ["sending", "failure"]);
    }

    #[test]
    fn payload_failure_is_the_same_failure() {
        let mut flow = BookingFlow::default();
        let mut view = RecordingView::new();

        flow.begin(&mut view);
        flow.complete(&Err::<(), _>(SubmitError::Payload("detached form".into())), &mut view);
        assert_eq!(flow.state(), Submission::Idle);
        assert!(view.alerted);

        // The user can try again right away.
        assert!(flow.begin(&mut view));
    }

    #[test]
    fn one_submission_at_a_time() {
        let mut flow = BookingFlow::default();
        let mut view = RecordingView::new();

        assert!(flow.begin(&mut view));
        assert!(!flow.begin(&mut view));

        flow.complete(&Ok::<_, SubmitError>(()), &mut view);
        // Still showing the success panel.
        assert!(!flow.begin(&mut view));
        assert_eq!(view.calls, ["sending", "success"]);
    }

    #[test]
    fn stray_transitions_are_ignored() {
        let mut flow = BookingFlow::default();
        let mut view = RecordingView::new();

        flow.settle(&mut view);
        flow.complete(&Ok::<_, SubmitError>(()), &mut view);
        assert_eq!(flow.state(), Submission::Idle);
        assert!(view.calls.is_empty());
    }
}
