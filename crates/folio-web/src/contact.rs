use folio_core::choreography;
use folio_core::content::Contact;
use folio_core::{Action, ContactForm, Field};
use gloo::timers::future::TimeoutFuture;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use tracing::debug;

use crate::motion::use_motion;

/// What the form says below the button
#[derive(Debug, Clone, PartialEq)]
enum Notice {
    Sent,
    Rejected(String),
}

#[component]
pub fn ContactSection(contact: Contact, submit_delay: Duration) -> impl IntoView {
    let motion = use_motion();
    let form = RwSignal::new(ContactForm::new());
    let notice = RwSignal::new(None::<Notice>);
    let delay_ms = u32::try_from(submit_delay.as_millis()).unwrap_or(u32::MAX);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        match form.try_update(|f| f.begin_submit()) {
            Some(Ok(ticket)) => {
                notice.set(None);
                spawn_local(async move {
                    TimeoutFuture::new(delay_ms).await;
                    form.update(|f| f.finish_submit(ticket));
                    notice.set(Some(Notice::Sent));
                    motion.play(|r| Some(r.success_pulse), Action::Restart);
                    debug!("contact form sent");
                });
            }
            Some(Err(rejected)) => notice.set(Some(Notice::Rejected(rejected.to_string()))),
            None => {}
        }
    };

    let input = move |field: Field, kind: &'static str, placeholder: &'static str| {
        view! {
            <div class="form-group">
                <label for=choreography::contact_input(field)>{field.to_string()}</label>
                <input
                    id=choreography::contact_input(field)
                    name=field.key()
                    type=kind
                    required=true
                    placeholder=placeholder
                    prop:value=move || form.with(|f| f.get(field).to_string())
                    on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
                    on:focus=move |_| motion.play(|r| r.focus(field), Action::Play)
                    on:blur=move |_| motion.play(|r| r.focus(field), Action::Reverse)
                />
            </div>
        }
    };

    let message = Field::Message;

    view! {
        <section id="contact" class="contact">
            <div class="section-inner">
                <h2 class="section-title">"Get In Touch"</h2>
                <p class="section-intro">{contact.intro.clone()}</p>
                <div class="contact-grid">
                    <div class="contact-info">
                        <p class="contact-item">
                            <span class="contact-icon">"✉️"</span>
                            <a href=format!("mailto:{}", contact.email)>{contact.email.clone()}</a>
                        </p>
                        <p class="contact-item">
                            <span class="contact-icon">"📱"</span>
                            <span>{contact.phone.clone()}</span>
                        </p>
                        <p class="contact-item">
                            <span class="contact-icon">"📍"</span>
                            <span>{contact.location.clone()}</span>
                        </p>
                        <div class="socials">
                            {contact
                                .socials
                                .iter()
                                .map(|social| {
                                    view! {
                                        <a
                                            class="social-link"
                                            href=social.url.clone()
                                            target="_blank"
                                            rel="noopener noreferrer"
                                            title=social.name.clone()
                                        >
                                            {social.icon.clone()}
                                        </a>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                    <form id=choreography::CONTACT_FORM class="contact-form" on:submit=on_submit>
                        {input(Field::Name, "text", "Your name")}
                        {input(Field::Email, "email", "your@email.com")}
                        {input(Field::Subject, "text", "What is it about?")}
                        <div class="form-group">
                            <label for=choreography::contact_input(message)>{message.to_string()}</label>
                            <textarea
                                id=choreography::contact_input(message)
                                name=message.key()
                                rows="6"
                                required=true
                                placeholder="Tell me about your project"
                                prop:value=move || form.with(|f| f.message.clone())
                                on:input=move |ev| form.update(|f| f.set(message, event_target_value(&ev)))
                                on:focus=move |_| motion.play(|r| r.focus(message), Action::Play)
                                on:blur=move |_| motion.play(|r| r.focus(message), Action::Reverse)
                            ></textarea>
                        </div>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || form.with(|f| !f.can_submit())
                        >
                            {move || if form.with(ContactForm::is_submitting) { "Sending..." } else { "Send Message" }}
                        </button>
                        {move || notice.get().map(|notice| match notice {
                            Notice::Sent => view! {
                                <p class="form-notice success">"Thanks! Your message has been sent."</p>
                            }.into_any(),
                            Notice::Rejected(reason) => view! {
                                <p class="form-notice error">{reason}</p>
                            }.into_any(),
                        })}
                    </form>
                </div>
            </div>
        </section>
    }
}
