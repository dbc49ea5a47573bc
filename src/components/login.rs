use leptos::*;
use crate::session::use_session;

/// Header widget: "Sign in with Google", or the avatar, name and sign-out.
#[component]
pub fn Login() -> impl IntoView {
    let manager = use_session();
    let session = manager.session();

    let sign_in = {
        let manager = manager.clone();
        move |_: ev::MouseEvent| {
            let manager = manager.clone();
            spawn_local(async move { manager.sign_in().await });
        }
    };
    let sign_out = move |_: ev::MouseEvent| {
        let manager = manager.clone();
        spawn_local(async move { manager.sign_out().await });
    };

    view! {
        <div class="login">
            <Show
                when=move || session.with(Option::is_some)
                fallback=move || view! {
                    <button class="sign-in" on:click=sign_in.clone()>{ "Sign in with Google" }</button>
                }
            >
                {move || session.get().map(|user| view! {
                    <div class="user">
                        {user.avatar_url.map(|url| view! { <img class="avatar" src=url alt="Avatar"/> })}
                        <span class="user-name">{ user.display_name }</span>
                    </div>
                })}
                <button class="sign-out" on:click=sign_out.clone()>{ "Sign Out" }</button>
            </Show>
        </div>
    }
}
