use std::collections::HashMap;
use std::error::Error;

use guillemet::{DefaultLoader, ExpansionPlan, Resources, Source};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod templates {
    guillemet::directory!("templates/");
    guillemet::file!("template/button2.tpl");
    guillemet::str!("hello_first_last", "<p>Hello «firstname» «lastname»</p>");
}


fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let html = templates::button().expand(&[("id", "42"), ("label", "My Todo")])?;
    println!("{}", html);

    let html2 = templates::button2().expand(&[("id", "43"), ("label", "Single File Todo")])?;
    println!("{}", html2);

    let names = HashMap::from([("firstname", "King"), ("lastname", "Tubby")]);
    let html3 = templates::hello_first_last().expand(&names)?;
    println!("{}", html3);

    let mail = templates::order_shipped().expand(&[("Name", "Ben"), ("OrderId", "A-1001")])?;
    println!("{}", mail);

    // templates picked at runtime go through a loader
    let loader = DefaultLoader::with_resources(
        Resources::new().with("farewell", include_str!("../templates/order-shipped.tpl")),
    );
    let plan = ExpansionPlan::load(&loader, &Source::Resource("farewell"))?;
    for (name, order) in [("Ann", "A-1002"), ("Bo", "A-1003")] {
        info!(name, order, "expanding");
        println!("{}", plan.expand(&[("Name", name), ("OrderId", order)])?);
    }

    Ok(())
}
