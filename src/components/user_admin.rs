//! User Admin Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::delete_confirm_button::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::{User, UserUpdate};

#[component]
pub fn UserAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let users = RwSignal::new(Vec::<User>::new());

    spawn_local(async move {
        match ctx.api().list_users().await {
            Ok(loaded) => users.set(loaded),
            Err(err) => ctx.notify_error("Napaka pri nalaganju uporabnikov", err),
        }
    });

    let toggle_staff = move |user_id: u32, is_staff: bool| {
        let update = UserUpdate {
            is_staff: Some(is_staff),
            ..Default::default()
        };
        spawn_local(async move {
            match ctx.api().update_user(user_id, &update).await {
                Ok(updated) => users.update(|list| {
                    if let Some(user) = list.iter_mut().find(|u| u.id == updated.id) {
                        *user = updated;
                    }
                }),
                Err(err) => ctx.notify_error("Napaka pri posodabljanju uporabnika", err),
            }
        });
    };

    let delete_user = move |user_id: u32| {
        spawn_local(async move {
            match ctx.api().delete_user(user_id).await {
                Ok(()) => users.update(|list| list.retain(|u| u.id != user_id)),
                Err(err) => ctx.notify_error("Napaka pri brisanju uporabnika", err),
            }
        });
    };

    view! {
        <div class="user-admin">
            <h1>"Uporabniki"</h1>
            <table>
                <thead>
                    <tr>
                        <th>"Uporabnik"</th>
                        <th>"Ime"</th>
                        <th>"E-pošta"</th>
                        <th>"Administrator"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || users.get() key=|u| (u.id, u.is_staff) let:user>
                        {
                            let user_id = user.id;
                            let is_staff = user.is_staff;
                            view! {
                                <tr>
                                    <td>{user.username.clone()}</td>
                                    <td>{format!("{} {}", user.first_name, user.last_name)}</td>
                                    <td>{user.email.clone()}</td>
                                    <td>
                                        <input
                                            type="checkbox"
                                            prop:checked=is_staff
                                            disabled=user.is_superuser
                                            on:change=move |_| toggle_staff(user_id, !is_staff)
                                        />
                                    </td>
                                    <td>
                                        <DeleteConfirmButton on_confirm=move |_: ()| delete_user(user_id) />
                                    </td>
                                </tr>
                            }
                        }
                    </For>
                </tbody>
            </table>
        </div>
    }
}
