use yew::prelude::*;

use crate::components::{render_user_avatar, render_user_name};
use crate::hooks::{use_credits, use_profile};

/// Signed-in person with their credit balance.
#[function_component]
pub fn AccountSummary() -> Html {
    let profile = use_profile();
    let credits = use_credits();

    let on_refresh = {
        let refetch_profile = profile.refetch.clone();
        let refetch_credits = credits.refetch.clone();
        Callback::from(move |_: MouseEvent| {
            refetch_profile.emit(());
            refetch_credits.emit(());
        })
    };

    html! {
        <div class="flex items-center justify-between gap-4 p-4 rounded-lg \
                    border border-neutral-200 dark:border-neutral-700">
            {profile.render("profile", |person, _, _| html! {
                <div class="flex items-center gap-3">
                    {render_user_avatar(person)}
                    <span class="font-medium">{render_user_name(person)}</span>
                </div>
            })}
            {credits.render("credits", |credits, is_loading, error| html! {
                <div class="text-right">
                    <p class="text-lg font-semibold">
                        {format!("{} credits", credits.balance)}
                    </p>
                    if is_loading {
                        <p class="text-xs text-neutral-500">{"Refreshing..."}</p>
                    }
                    if let Some(error) = error {
                        <p class="text-xs text-red-600 dark:text-red-400">
                            {error.to_string()}
                        </p>
                    }
                </div>
            })}
            <button
                class="text-sm text-neutral-600 hover:text-neutral-900 \
                       dark:text-neutral-400 dark:hover:text-neutral-100"
                onclick={on_refresh}
            >
                {"Refresh"}
            </button>
        </div>
    }
}
