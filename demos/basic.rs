use dragon_props::{AppContext, PropertyRequest, PropertyStore};

fn main() -> Result<(), dragon_props::Error> {
    let ctx = AppContext::builder()
        .with_properties(
            PropertyStore::builder()
                .with_root("demos/config")
                .build()?,
        )
        .build()?;

    let props = ctx.properties();

    println!("app.name = {:?}", props.get("app.name"));

    let timeout: Option<i64> = PropertyRequest::key("app.timeout").fetch(props)?;
    println!("app.timeout = {timeout:?}");

    let ratio: Option<f64> = PropertyRequest::for_member("Demo", "ratio")
        .optional()
        .fetch(props)?;
    println!("Demo.ratio = {ratio:?}");

    Ok(())
}
