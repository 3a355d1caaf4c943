fn main() {
    fics_agent_lib::run()
}
