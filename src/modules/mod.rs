pub mod books;
pub mod sellers;

use bookstall_kernel::ModuleRegistry;

/// Register all catalog modules with the registry.
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(sellers::create_module());
    registry.register(books::create_module());
}
