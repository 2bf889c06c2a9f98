fn main() {
    financas_frontend::run();
}
