use payloads::Person;
use yew::prelude::*;

/// Renders a person's display name (if set) or username as Html, with the
/// username as a tooltip when the display name is shown.
pub fn render_user_name(person: &Person) -> Html {
    match &person.display_name {
        Some(display_name) => {
            html! {
                <span title={format!("@{}", person.username)}>
                    {display_name}
                </span>
            }
        }
        None => {
            html! { {&person.username} }
        }
    }
}

/// Renders a circular avatar with the first character of the person's
/// display name or username.
pub fn render_user_avatar(person: &Person) -> Html {
    let initial = person
        .name()
        .chars()
        .next()
        .unwrap_or('?')
        .to_uppercase()
        .to_string();

    html! {
        <div class="w-8 h-8 bg-neutral-200 dark:bg-neutral-600 rounded-full \
                    flex items-center justify-center"
             title={format!("@{}", person.username)}>
            <span class="text-sm font-medium text-neutral-600 \
                         dark:text-neutral-300">
                {initial}
            </span>
        </div>
    }
}
