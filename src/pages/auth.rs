//! Sign-in / sign-up form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, SignUpOutcome};
use crate::context::use_session;
use crate::store::{store_push_notice, use_app_store, NoticeKind};

const MIN_PASSWORD_LEN: usize = 6;

#[component]
pub fn AuthPage() -> impl IntoView {
    let session = use_session();
    let store = use_app_store();

    let (is_login, set_is_login) = signal(true);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (full_name, set_full_name) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        let password = password.get_untracked();
        if password.chars().count() < MIN_PASSWORD_LEN {
            store_push_notice(&store, NoticeKind::Error, "A senha deve ter pelo menos 6 caracteres");
            return;
        }
        let login = is_login.get_untracked();
        let name = full_name.get_untracked();
        set_loading.set(true);

        spawn_local(async move {
            let client = session.client();
            if login {
                match commands::sign_in_with_password(&client, &email, &password).await {
                    Ok(new_session) => {
                        store_push_notice(&store, NoticeKind::Success, "Login realizado com sucesso!");
                        session.sign_in(new_session);
                    }
                    Err(e) => store_push_notice(&store, NoticeKind::Error, e.to_string()),
                }
            } else {
                match commands::sign_up(&client, &email, &password, &name).await {
                    Ok(SignUpOutcome::SignedIn(new_session)) => {
                        store_push_notice(&store, NoticeKind::Success, "Conta criada!");
                        session.sign_in(new_session);
                    }
                    Ok(SignUpOutcome::ConfirmationRequired(_)) => {
                        store_push_notice(
                            &store,
                            NoticeKind::Info,
                            "Conta criada! Confirme seu e-mail e faça login.",
                        );
                        set_is_login.set(true);
                    }
                    Err(e) => store_push_notice(&store, NoticeKind::Error, e.to_string()),
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <div class="auth-brand">
                    <span class="auth-logo">"🕒"</span>
                    <h1 class="gradient-text">"Workhour Cloud"</h1>
                </div>
                <form class="auth-form" on:submit=on_submit>
                    <Show when=move || !is_login.get()>
                        <label for="fullName">"Nome Completo"</label>
                        <input
                            id="fullName"
                            type="text"
                            required=true
                            prop:value=move || full_name.get()
                            on:input=move |ev| set_full_name.set(event_target_value(&ev))
                        />
                    </Show>
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        required=true
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <label for="password">"Senha"</label>
                    <input
                        id="password"
                        type="password"
                        required=true
                        minlength="6"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-primary btn-block" disabled=move || loading.get()>
                        {move || match (loading.get(), is_login.get()) {
                            (true, _) => "Carregando...",
                            (false, true) => "Entrar",
                            (false, false) => "Criar Conta",
                        }}
                    </button>
                </form>
                <button class="link-btn" on:click=move |_| set_is_login.update(|l| *l = !*l)>
                    {move || if is_login.get() { "Não tem conta? Criar conta" } else { "Já tem conta? Fazer login" }}
                </button>
            </div>
        </div>
    }
}
