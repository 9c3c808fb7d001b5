/// Creates a stream that re-emits a snapshot whenever any listed property changes.
///
/// Every field named must have a `watch()` method. The stream combines all of
/// them and, on each change, yields `$self.$snapshot()` computed from a clone
/// taken when the stream was created. Because properties share their backing
/// channels across clones, the snapshot always reflects the latest values.
///
/// # Example
/// ```ignore
/// impl MyProperties {
///     pub fn watch(&self) -> impl Stream<Item = MySnapshot> + Send {
///         watch_snapshot!(self, snapshot, field1, field2, field3)
///     }
/// }
/// ```
#[macro_export]
macro_rules! watch_snapshot {
    ($self:expr, $snapshot:ident, $($source:ident),+ $(,)?) => {
        {
            use ::futures::StreamExt;

            let cloned = $self.clone();
            let streams: Vec<::futures::stream::BoxStream<'_, ()>> = vec![
                $($self.$source.watch().map(|_| ()).boxed(),)+
            ];
            ::futures::stream::select_all(streams).map(move |_| cloned.$snapshot())
        }
    };
}
