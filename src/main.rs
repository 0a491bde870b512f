use anyhow::Result;

fn main() -> Result<()> {
    orrery::application::execute()
}
