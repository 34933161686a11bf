use super::Settings;
use crate::output::Output;
use crate::{render, ui};
use color_eyre::eyre::eyre;
use color_eyre::Result;

pub async fn run_person(settings: &Settings, id: i64, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    let person = app.person();
    ui::loading(&format!("Loading person {}", id), output, person.load(id)).await;

    let image_base = settings.config.api.image_base_url.as_str();
    let loaded = output.state("Person", person.details.current(), |out, details| {
        out.table(&render::person(details, image_base));
        out.data("person", details);
    });
    if loaded.is_none() {
        return Err(eyre!("Could not load person {}", id));
    }

    output.heading("Known for");
    output.state("Movie credits", person.credits.current(), |out, credits| {
        out.table(&render::person_credits(credits));
        out.data("credits", credits);
    });
    Ok(())
}
