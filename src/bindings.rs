use crate::dispatch::{Dispatcher, EventKind};
use crate::page::{BUTTON_GROUP, ElementId};
use crate::record::{capture_record, render_record};

/// Install every demo behavior on the dispatcher. Mirrors the page setup
/// done once at startup, before any event is delivered.
pub fn install(dispatcher: &mut Dispatcher) {
    dispatcher.add_listener(
        ElementId::Btn1,
        EventKind::Click,
        Box::new(|ctx| ctx.log("I was clicked")),
    );

    // btn2 reports which element was clicked, taken from the notification
    // target rather than a captured binding.
    dispatcher.add_listener(
        ElementId::Btn2,
        EventKind::Click,
        Box::new(|ctx| {
            let line = format!("{} was clicked", ctx.target);
            ctx.log(line);
        }),
    );

    // One shared handler for the whole button group.
    for id in BUTTON_GROUP {
        dispatcher.add_listener(
            id,
            EventKind::Click,
            Box::new(|ctx| ctx.log("we were clicked")),
        );
    }

    // Registered inline, handler defined at the registration site.
    dispatcher.add_listener(
        ElementId::Btn5,
        EventKind::Click,
        Box::new(|ctx| {
            let line = format!("{} was clicked", ctx.target);
            ctx.log(line);
        }),
    );

    // Fires on every edit of the free text field.
    dispatcher.add_listener(
        ElementId::Input1,
        EventKind::Input,
        Box::new(|ctx| {
            let line = ctx.page.input1.value.clone();
            ctx.log(line);
        }),
    );

    dispatcher.add_listener(
        ElementId::Check1,
        EventKind::Change,
        Box::new(|ctx| {
            let line = format!("Am I checked: {}", ctx.page.check1.checked);
            ctx.log(line);
        }),
    );

    dispatcher.add_listener(
        ElementId::Drop1,
        EventKind::Change,
        Box::new(|ctx| {
            let line = format!("{} is selected.", ctx.page.drop1.value());
            ctx.log(line);
        }),
    );

    // The capstone workflow: suppress the default reaction first, then
    // capture the fields and append the row.
    dispatcher.add_listener(
        ElementId::NameForm,
        EventKind::Submit,
        Box::new(|ctx| {
            ctx.prevent_default();
            let record = capture_record(ctx.page);
            render_record(&record, &mut ctx.page.table);
        }),
    );
}
